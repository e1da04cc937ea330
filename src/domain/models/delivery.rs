use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::domain::models::calendar_event::CalendarEvent;

/// How a "send invite" request is handled once it reaches the service.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryPolicy {
    #[default]
    Automatic,
    Ask,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryDecision {
    Dispatch,
    AwaitConfirmation,
    Skip,
}

impl DeliveryPolicy {
    pub fn decide(self) -> DeliveryDecision {
        match self {
            DeliveryPolicy::Automatic => DeliveryDecision::Dispatch,
            DeliveryPolicy::Ask => DeliveryDecision::AwaitConfirmation,
            DeliveryPolicy::None => DeliveryDecision::Skip,
        }
    }
}

impl FromStr for DeliveryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "automatic" => Ok(DeliveryPolicy::Automatic),
            "ask" => Ok(DeliveryPolicy::Ask),
            "none" => Ok(DeliveryPolicy::None),
            other => Err(format!("unknown delivery policy '{}'", other)),
        }
    }
}

impl fmt::Display for DeliveryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeliveryPolicy::Automatic => "automatic",
            DeliveryPolicy::Ask => "ask",
            DeliveryPolicy::None => "none",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InviteState {
    #[default]
    Idle,
    Sending,
    Sent,
    Failed,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InviteRequest {
    pub recipient: Option<String>,
    pub event: CalendarEvent,
    pub sender_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// Dismissable, user-visible acknowledgment of a delivery attempt.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct InviteNotice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Everything the transport needs for one invite. Instants are ISO-8601 text.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct InvitePayload {
    pub recipient: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_time: String,
    pub end_time: String,
    pub ics: String,
    pub sender_name: String,
    pub event_url: Option<String>,
}
