use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

/// Directory row managed by the external trainer registry; read-only here.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Trainer {
    pub id: String,
    pub name: String,
    pub offered_training_types: Json<Vec<String>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
