use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::error::AppError;
use crate::state::AppState;
use crate::domain::services::rsvp_cache::RsvpCache;
use crate::infra::transport::http_invite_transport::HttpInviteTransport;
use crate::infra::repositories::{
    postgres_rsvp_repo::PostgresRsvpRepo, postgres_fan_repo::PostgresFanRepo,
    postgres_report_repo::PostgresReportRepo,
    sqlite_rsvp_repo::SqliteRsvpRepo, sqlite_fan_repo::SqliteFanRepo,
    sqlite_report_repo::SqliteReportRepo,
};

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let database_url = &config.database_url;
    let invite_transport = Arc::new(HttpInviteTransport::new(
        config.invite_service_url.clone(),
        config.invite_service_token.clone(),
    ));
    let rsvp_cache = Arc::new(RsvpCache::new(chrono::Duration::seconds(config.rsvp_cache_ttl_secs)));

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let opts = PgConnectOptions::from_str(database_url)?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await?;

        run_postgres_migrations(&pool).await?;

        Ok(AppState {
            config: config.clone(),
            rsvp_repo: Arc::new(PostgresRsvpRepo::new(pool.clone())),
            fan_repo: Arc::new(PostgresFanRepo::new(pool.clone())),
            report_repo: Arc::new(PostgresReportRepo::new(pool.clone())),
            invite_transport,
            rsvp_cache,
        })
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await?;

        run_sqlite_migrations(&pool).await?;

        Ok(AppState {
            config: config.clone(),
            rsvp_repo: Arc::new(SqliteRsvpRepo::new(pool.clone())),
            fan_repo: Arc::new(SqliteFanRepo::new(pool.clone())),
            report_repo: Arc::new(SqliteReportRepo::new(pool.clone())),
            invite_transport,
            rsvp_cache,
        })
    }
}

pub async fn run_postgres_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .map_err(|e| AppError::Database(e.into()))
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .map_err(|e| AppError::Database(e.into()))
}
