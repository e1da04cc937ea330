use crate::domain::{models::report::ReportWindow, ports::FanReportRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteReportRepo {
    pool: SqlitePool,
}

impl SqliteReportRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// Window bounds are inclusive on both ends.
#[async_trait]
impl FanReportRepository for SqliteReportRepo {
    async fn count_new_fans(&self, user_id: &str, window: &ReportWindow) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM fans WHERE user_id = ? AND created_at >= ? AND created_at <= ?"
        )
            .bind(user_id)
            .bind(window.start)
            .bind(window.end)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count_attended_fans(&self, user_id: &str, window: &ReportWindow) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT fe.fan_id) FROM fan_events fe
             JOIN fans f ON f.id = fe.fan_id
             WHERE f.user_id = ? AND fe.attended_at >= ? AND fe.attended_at <= ?"
        )
            .bind(user_id)
            .bind(window.start)
            .bind(window.end)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count_rsvps_for_owner(&self, owner_email: &str, window: &ReportWindow) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM rsvps r
             JOIN events e ON e.id = r.event_id
             WHERE e.owner_email = ? AND r.created_at >= ? AND r.created_at <= ?"
        )
            .bind(owner_email)
            .bind(window.start)
            .bind(window.end)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
