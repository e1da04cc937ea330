use fanvite_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::repositories::{
        sqlite_rsvp_repo::SqliteRsvpRepo,
        sqlite_fan_repo::SqliteFanRepo,
        sqlite_report_repo::SqliteReportRepo,
    },
    domain::models::{delivery::InvitePayload, fan::{Fan, FanEvent}},
    domain::ports::{FanRepository, InviteTransport},
    domain::services::rsvp_cache::RsvpCache,
    error::TransportError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, header},
    response::Response,
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tower::ServiceExt;

#[derive(Default)]
pub struct MockInviteTransport {
    pub calls: Mutex<Vec<InvitePayload>>,
    pub failure: Mutex<Option<TransportError>>,
}

#[allow(dead_code)]
impl MockInviteTransport {
    pub fn fail_with(&self, error: TransportError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> Vec<InvitePayload> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InviteTransport for MockInviteTransport {
    async fn deliver(&self, payload: &InvitePayload) -> Result<(), TransportError> {
        self.calls.lock().unwrap().push(payload.clone());
        match self.failure.lock().unwrap().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub transport: Arc<MockInviteTransport>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(Config::default()).await
    }

    pub async fn with_config(mut config: Config) -> Self {
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

        config.database_url = db_url;
        let transport = Arc::new(MockInviteTransport::default());

        let state = Arc::new(AppState {
            rsvp_repo: Arc::new(SqliteRsvpRepo::new(pool.clone())),
            fan_repo: Arc::new(SqliteFanRepo::new(pool.clone())),
            report_repo: Arc::new(SqliteReportRepo::new(pool.clone())),
            invite_transport: transport.clone(),
            rsvp_cache: Arc::new(RsvpCache::new(chrono::Duration::seconds(config.rsvp_cache_ttl_secs))),
            config,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            transport,
        }
    }

    pub async fn seed_event(&self, owner_email: &str, title: &str) -> String {
        let id = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO events (id, owner_email, title, start_time, created_at) VALUES (?, ?, ?, ?, ?)")
            .bind(&id)
            .bind(owner_email)
            .bind(title)
            .bind(Utc::now())
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .unwrap();
        id
    }

    pub async fn seed_fan(&self, user_id: &str, name: &str, created_at: DateTime<Utc>) -> String {
        let mut fan = Fan::new(user_id.to_string(), name.to_string(), None);
        fan.created_at = created_at;
        self.state.fan_repo.create_fan(&fan).await.unwrap().id
    }

    pub async fn seed_attendance(&self, fan_id: &str, event_id: &str, attended_at: DateTime<Utc>) {
        let attendance = FanEvent::new(fan_id.to_string(), event_id.to_string(), attended_at);
        self.state.fan_repo.record_attendance(&attendance).await.unwrap();
    }

    pub async fn set_rsvp_created_at(&self, rsvp_id: &str, created_at: DateTime<Utc>) {
        sqlx::query("UPDATE rsvps SET created_at = ? WHERE id = ?")
            .bind(created_at)
            .bind(rsvp_id)
            .execute(&self.pool)
            .await
            .unwrap();
    }

    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>, identity: Option<(&str, &str)>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some((user_id, email)) = identity {
            builder = builder.header("x-user-id", user_id).header("x-user-email", email);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }
}

#[allow(dead_code)]
pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
