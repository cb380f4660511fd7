use crate::domain::models::company::Company;
use crate::domain::ports::CompanyDirectory;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteCompanyRepo {
    pool: SqlitePool,
}

impl SqliteCompanyRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyDirectory for SqliteCompanyRepo {
    async fn find_by_id(&self, id: &str) -> Result<Option<Company>, AppError> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
