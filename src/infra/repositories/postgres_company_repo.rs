use crate::domain::models::company::Company;
use crate::domain::ports::CompanyDirectory;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresCompanyRepo {
    pool: PgPool,
}

impl PostgresCompanyRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyDirectory for PostgresCompanyRepo {
    async fn find_by_id(&self, id: &str) -> Result<Option<Company>, AppError> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
