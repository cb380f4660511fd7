use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::ConnectOptions;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{PgPool, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::schedule_gate::ScheduleGate;
use crate::infra::clock::SystemClock;
use crate::infra::repositories::{
    postgres_booking_repo::PostgresBookingRepo, postgres_company_repo::PostgresCompanyRepo,
    postgres_trainer_repo::PostgresTrainerRepo, sqlite_booking_repo::SqliteBookingRepo,
    sqlite_company_repo::SqliteCompanyRepo, sqlite_trainer_repo::SqliteTrainerRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let clock = Arc::new(SystemClock);
    let schedule_gate = Arc::new(ScheduleGate::new());

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        AppState {
            config: config.clone(),
            booking_repo: Arc::new(PostgresBookingRepo::new(pool.clone())),
            trainer_dir: Arc::new(PostgresTrainerRepo::new(pool.clone())),
            company_dir: Arc::new(PostgresCompanyRepo::new(pool)),
            clock,
            schedule_gate,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        AppState {
            config: config.clone(),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            trainer_dir: Arc::new(SqliteTrainerRepo::new(pool.clone())),
            company_dir: Arc::new(SqliteCompanyRepo::new(pool)),
            clock,
            schedule_gate,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
