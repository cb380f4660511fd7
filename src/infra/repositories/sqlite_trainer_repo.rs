use crate::domain::models::trainer::Trainer;
use crate::domain::ports::TrainerDirectory;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteTrainerRepo {
    pool: SqlitePool,
}

impl SqliteTrainerRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrainerDirectory for SqliteTrainerRepo {
    async fn find_by_id(&self, id: &str) -> Result<Option<Trainer>, AppError> {
        sqlx::query_as::<_, Trainer>("SELECT * FROM trainers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
