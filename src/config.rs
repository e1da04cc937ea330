use std::env;
use chrono::Weekday;
use chrono_tz::Tz;
use tracing::warn;
use crate::domain::models::delivery::DeliveryPolicy;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub invite_service_url: String,
    pub invite_service_token: String,
    pub sender_name: String,
    pub delivery_policy: DeliveryPolicy,
    pub report_timezone: Tz,
    pub report_week_start: Weekday,
    pub rsvp_cache_ttl_secs: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://fanvite.db?mode=rwc".to_string()),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            invite_service_url: env::var("INVITE_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8000/api/v1/invites".to_string()),
            invite_service_token: env::var("INVITE_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            sender_name: env::var("INVITE_SENDER_NAME").unwrap_or_else(|_| "Fanvite".to_string()),
            delivery_policy: parse_or_default("INVITE_DELIVERY_POLICY", DeliveryPolicy::Automatic),
            report_timezone: parse_or_default("REPORT_TIMEZONE", chrono_tz::UTC),
            report_week_start: parse_or_default("REPORT_WEEK_START", Weekday::Mon),
            rsvp_cache_ttl_secs: parse_or_default("RSVP_CACHE_TTL_SECS", 30),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            port: 0,
            invite_service_url: "http://localhost".to_string(),
            invite_service_token: "token".to_string(),
            sender_name: "Fanvite".to_string(),
            delivery_policy: DeliveryPolicy::Automatic,
            report_timezone: chrono_tz::UTC,
            report_week_start: Weekday::Mon,
            rsvp_cache_ttl_secs: 30,
        }
    }
}

fn parse_or_default<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid value for {}: {}", key, raw);
            default
        }),
        Err(_) => default,
    }
}
