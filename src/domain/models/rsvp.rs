use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_RSVP_STATUS: &str = "pending";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Rsvp {
    pub id: String,
    pub event_id: String,
    pub fan_id: String,
    pub status: String, // pending, confirmed, ... (free text)
    pub added_to_calendar: bool,
    pub reminder_24h_sent: bool,
    pub reminder_1h_sent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rsvp {
    pub fn new(event_id: String, fan_id: String, status: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            fan_id,
            status: status.unwrap_or_else(|| DEFAULT_RSVP_STATUS.to_string()),
            added_to_calendar: false,
            reminder_24h_sent: false,
            reminder_1h_sent: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, changes: &RsvpChanges) {
        if let Some(status) = &changes.status {
            self.status = status.clone();
        }
        if let Some(added) = changes.added_to_calendar {
            self.added_to_calendar = added;
        }
        if let Some(sent) = changes.reminder_24h_sent {
            self.reminder_24h_sent = sent;
        }
        if let Some(sent) = changes.reminder_1h_sent {
            self.reminder_1h_sent = sent;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial update; absent fields are left as they are.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RsvpChanges {
    pub status: Option<String>,
    pub added_to_calendar: Option<bool>,
    pub reminder_24h_sent: Option<bool>,
    pub reminder_1h_sent: Option<bool>,
}
