use crate::domain::models::trainer::Trainer;
use crate::domain::ports::TrainerDirectory;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresTrainerRepo {
    pool: PgPool,
}

impl PostgresTrainerRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrainerDirectory for PostgresTrainerRepo {
    async fn find_by_id(&self, id: &str) -> Result<Option<Trainer>, AppError> {
        sqlx::query_as::<_, Trainer>("SELECT * FROM trainers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
