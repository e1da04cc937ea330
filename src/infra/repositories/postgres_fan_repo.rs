use crate::domain::{models::fan::{Fan, FanEvent}, ports::FanRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresFanRepo {
    pool: PgPool,
}

impl PostgresFanRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FanRepository for PostgresFanRepo {
    async fn create_fan(&self, fan: &Fan) -> Result<Fan, AppError> {
        sqlx::query_as::<_, Fan>(
            "INSERT INTO fans (id, user_id, name, email, created_at) VALUES ($1, $2, $3, $4, $5) RETURNING *"
        )
            .bind(&fan.id)
            .bind(&fan.user_id)
            .bind(&fan.name)
            .bind(&fan.email)
            .bind(fan.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn record_attendance(&self, attendance: &FanEvent) -> Result<FanEvent, AppError> {
        sqlx::query_as::<_, FanEvent>(
            "INSERT INTO fan_events (id, fan_id, event_id, ticket_price, attendance_status, attended_at) VALUES ($1, $2, $3, $4, $5, $6) RETURNING *"
        )
            .bind(&attendance.id)
            .bind(&attendance.fan_id)
            .bind(&attendance.event_id)
            .bind(attendance.ticket_price)
            .bind(&attendance.attendance_status)
            .bind(attendance.attended_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
