use serde::{Deserialize, Serialize};
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Organizer {
    pub name: String,
    pub email: String,
}

/// Event data handed to the calendar builders. Never persisted here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    // A missing title is accepted and rendered as an empty summary.
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub organizer: Option<Organizer>,
}

impl CalendarEvent {
    pub fn new(title: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            description: None,
            location: None,
            start_time,
            end_time: None,
            url: None,
            organizer: None,
        }
    }

    /// The end instant, one hour after the start when none was supplied.
    /// An end before the start is passed through untouched.
    pub fn effective_end(&self) -> DateTime<Utc> {
        self.end_time.unwrap_or(self.start_time + Duration::hours(1))
    }
}
