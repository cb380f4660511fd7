use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Directory row managed by the external company registry; read-only here.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
