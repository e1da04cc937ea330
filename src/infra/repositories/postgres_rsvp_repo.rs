use crate::domain::{models::rsvp::Rsvp, ports::RsvpRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresRsvpRepo {
    pool: PgPool,
}

impl PostgresRsvpRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RsvpRepository for PostgresRsvpRepo {
    async fn list(&self, event_id: Option<&str>) -> Result<Vec<Rsvp>, AppError> {
        match event_id {
            Some(event_id) => sqlx::query_as::<_, Rsvp>(
                "SELECT * FROM rsvps WHERE event_id = $1 ORDER BY created_at DESC"
            )
                .bind(event_id)
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database),
            None => sqlx::query_as::<_, Rsvp>("SELECT * FROM rsvps ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database),
        }
    }

    async fn create(&self, rsvp: &Rsvp) -> Result<Rsvp, AppError> {
        sqlx::query_as::<_, Rsvp>(
            "INSERT INTO rsvps (id, event_id, fan_id, status, added_to_calendar, reminder_24h_sent, reminder_1h_sent, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT (event_id, fan_id) DO NOTHING
             RETURNING *"
        )
            .bind(&rsvp.id).bind(&rsvp.event_id).bind(&rsvp.fan_id).bind(&rsvp.status)
            .bind(rsvp.added_to_calendar).bind(rsvp.reminder_24h_sent).bind(rsvp.reminder_1h_sent)
            .bind(rsvp.created_at).bind(rsvp.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::Conflict("Fan has already RSVP'd to this event".into()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Rsvp>, AppError> {
        sqlx::query_as::<_, Rsvp>("SELECT * FROM rsvps WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_event_and_fan(&self, event_id: &str, fan_id: &str) -> Result<Option<Rsvp>, AppError> {
        sqlx::query_as::<_, Rsvp>("SELECT * FROM rsvps WHERE event_id = $1 AND fan_id = $2")
            .bind(event_id)
            .bind(fan_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, rsvp: &Rsvp) -> Result<Rsvp, AppError> {
        sqlx::query_as::<_, Rsvp>(
            "UPDATE rsvps SET status=$1, added_to_calendar=$2, reminder_24h_sent=$3, reminder_1h_sent=$4, updated_at=$5 WHERE id=$6 RETURNING *"
        )
            .bind(&rsvp.status)
            .bind(rsvp.added_to_calendar)
            .bind(rsvp.reminder_24h_sent)
            .bind(rsvp.reminder_1h_sent)
            .bind(rsvp.updated_at)
            .bind(&rsvp.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound(format!("RSVP {} not found", rsvp.id)))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM rsvps WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("RSVP {} not found", id)));
        }
        Ok(())
    }

    async fn count_for_owner(&self, owner_email: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM rsvps r JOIN events e ON e.id = r.event_id WHERE e.owner_email = $1"
        )
            .bind(owner_email)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
