use training_booking_backend::{
    api::router::create_router,
    config::Config,
    domain::models::actor::Claims,
    domain::ports::Clock,
    domain::services::schedule_gate::ScheduleGate,
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo, sqlite_company_repo::SqliteCompanyRepo,
        sqlite_trainer_repo::SqliteTrainerRepo,
    },
    state::AppState,
};

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::Value;
use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

/// Every test runs at this frozen instant (a Saturday morning), so "future"
/// booking dates can be plain constants.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 1, 8, 0, 0).unwrap()
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let pub_key_pem = include_str!("../tests/keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_public_key: pub_key_pem.to_string(),
        };

        let state = Arc::new(AppState {
            config,
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            trainer_dir: Arc::new(SqliteTrainerRepo::new(pool.clone())),
            company_dir: Arc::new(SqliteCompanyRepo::new(pool.clone())),
            clock: Arc::new(FixedClock(test_now())),
            schedule_gate: Arc::new(ScheduleGate::new()),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Mints an access token the way the external identity provider would.
    pub fn auth_for(&self, role: &str, subject: &str) -> AuthHeaders {
        let priv_key_pem = include_str!("../tests/keys/test_private.pem");
        let csrf_token = format!("csrf-{}", Uuid::new_v4());

        let claims = Claims {
            sub: subject.to_string(),
            role: role.to_string(),
            csrf_token: csrf_token.clone(),
            aud: "training-portal".to_string(),
            exp: 4102444800, // 2100-01-01
        };

        let access_token = encode(
            &Header::new(Algorithm::EdDSA),
            &claims,
            &EncodingKey::from_ed_pem(priv_key_pem.as_bytes()).unwrap(),
        )
        .unwrap();

        AuthHeaders {
            access_token,
            csrf_token,
        }
    }

    pub fn admin(&self) -> AuthHeaders {
        self.auth_for("ADMIN", "adm-1")
    }

    pub fn company(&self, id: &str) -> AuthHeaders {
        self.auth_for("COMPANY", id)
    }

    pub fn trainer(&self, id: &str) -> AuthHeaders {
        self.auth_for("TRAINER", id)
    }

    pub async fn seed_trainer(&self, id: &str, offered: &[&str]) {
        self.seed_trainer_with_active(id, offered, true).await;
    }

    pub async fn seed_trainer_with_active(&self, id: &str, offered: &[&str], active: bool) {
        let types = serde_json::to_string(offered).unwrap();
        sqlx::query(
            "INSERT INTO trainers (id, name, offered_training_types, is_active, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(format!("Trainer {id}"))
        .bind(types)
        .bind(active)
        .bind(test_now())
        .execute(&self.pool)
        .await
        .expect("Failed to seed trainer");
    }

    pub async fn seed_company(&self, id: &str) {
        sqlx::query("INSERT INTO companies (id, name, is_active, created_at) VALUES (?, ?, 1, ?)")
            .bind(id)
            .bind(format!("Company {id}"))
            .bind(test_now())
            .execute(&self.pool)
            .await
            .expect("Failed to seed company");
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        auth: Option<&AuthHeaders>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(auth) = auth {
            builder = builder
                .header(
                    header::COOKIE,
                    format!("access_token={}", auth.access_token),
                )
                .header("X-CSRF-Token", &auth.csrf_token);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub async fn parse_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
    }
}
