use crate::domain::models::{
    rsvp::Rsvp, fan::{Fan, FanEvent}, report::ReportWindow, delivery::InvitePayload,
};
use crate::error::{AppError, TransportError};
use async_trait::async_trait;

#[async_trait]
pub trait RsvpRepository: Send + Sync {
    async fn list(&self, event_id: Option<&str>) -> Result<Vec<Rsvp>, AppError>;
    /// Conditional insert; an existing (event, fan) pair yields `AppError::Conflict`.
    async fn create(&self, rsvp: &Rsvp) -> Result<Rsvp, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Rsvp>, AppError>;
    async fn find_by_event_and_fan(&self, event_id: &str, fan_id: &str) -> Result<Option<Rsvp>, AppError>;
    async fn update(&self, rsvp: &Rsvp) -> Result<Rsvp, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn count_for_owner(&self, owner_email: &str) -> Result<i64, AppError>;
}

#[async_trait]
pub trait FanRepository: Send + Sync {
    async fn create_fan(&self, fan: &Fan) -> Result<Fan, AppError>;
    async fn record_attendance(&self, attendance: &FanEvent) -> Result<FanEvent, AppError>;
}

#[async_trait]
pub trait FanReportRepository: Send + Sync {
    async fn count_new_fans(&self, user_id: &str, window: &ReportWindow) -> Result<i64, AppError>;
    /// Distinct fans, not attendance rows.
    async fn count_attended_fans(&self, user_id: &str, window: &ReportWindow) -> Result<i64, AppError>;
    async fn count_rsvps_for_owner(&self, owner_email: &str, window: &ReportWindow) -> Result<i64, AppError>;
}

/// One-shot delivery of a calendar invite. No retries are attempted behind this call.
#[async_trait]
pub trait InviteTransport: Send + Sync {
    async fn deliver(&self, payload: &InvitePayload) -> Result<(), TransportError>;
}
