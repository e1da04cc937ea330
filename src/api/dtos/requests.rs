use crate::domain::models::{calendar_event::CalendarEvent, delivery::{DeliveryPolicy, InviteRequest}};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct SendInviteRequest {
    pub recipient: Option<String>,
    pub event: CalendarEvent,
    pub sender_name: Option<String>,
    /// Overrides the configured policy for this request.
    pub policy: Option<DeliveryPolicy>,
}

impl SendInviteRequest {
    pub fn into_parts(self) -> (Option<DeliveryPolicy>, InviteRequest) {
        (
            self.policy,
            InviteRequest {
                recipient: self.recipient,
                event: self.event,
                sender_name: self.sender_name,
            },
        )
    }
}

#[derive(Deserialize)]
pub struct CreateRsvpRequest {
    pub event_id: String,
    pub fan_id: String,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct ListRsvpsQuery {
    pub event_id: Option<String>,
}

#[derive(Deserialize)]
pub struct LookupRsvpQuery {
    pub event_id: String,
    pub fan_id: String,
}
