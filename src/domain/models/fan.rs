use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Fan {
    pub id: String,
    pub user_id: String, // owning creator account
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Fan {
    pub fn new(user_id: String, name: String, email: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            name,
            email,
            created_at: Utc::now(),
        }
    }
}

/// Historical attendance/ticket record for one (fan, event) pair.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct FanEvent {
    pub id: String,
    pub fan_id: String,
    pub event_id: String,
    pub ticket_price: Option<f64>,
    pub attendance_status: Option<String>,
    pub attended_at: DateTime<Utc>,
}

impl FanEvent {
    pub fn new(fan_id: String, event_id: String, attended_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            fan_id,
            event_id,
            ticket_price: None,
            attendance_status: Some("attended".to_string()),
            attended_at,
        }
    }
}
