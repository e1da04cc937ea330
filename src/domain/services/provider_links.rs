use crate::domain::models::calendar_event::CalendarEvent;
use crate::domain::services::calendar::format_utc_basic;
use chrono::{DateTime, Utc};
use serde::Serialize;
use url::form_urlencoded;

const GOOGLE_BASE: &str = "https://calendar.google.com/calendar/render";
const YAHOO_BASE: &str = "https://calendar.yahoo.com/";
const OUTLOOK_BASE: &str = "https://outlook.live.com/calendar/0/deeplink/compose";
const OFFICE365_BASE: &str = "https://outlook.office.com/calendar/0/deeplink/compose";

/// "Add to calendar" deep links, one per provider.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ProviderLinkSet {
    pub google: String,
    pub yahoo: String,
    pub outlook: String,
    pub office365: String,
}

pub fn build_provider_links(event: &CalendarEvent) -> ProviderLinkSet {
    ProviderLinkSet {
        google: google_link(event),
        yahoo: yahoo_link(event),
        outlook: outlook_link(OUTLOOK_BASE, event),
        office365: outlook_link(OFFICE365_BASE, event),
    }
}

fn google_link(event: &CalendarEvent) -> String {
    let dates = format!(
        "{}/{}",
        format_utc_basic(&event.start_time),
        format_utc_basic(&event.effective_end())
    );
    with_query(GOOGLE_BASE, &[
        ("action", "TEMPLATE"),
        ("text", event.title.as_str()),
        ("dates", dates.as_str()),
        ("details", description(event)),
        ("location", location(event)),
    ])
}

fn yahoo_link(event: &CalendarEvent) -> String {
    let start = format_utc_basic(&event.start_time);
    let end = format_utc_basic(&event.effective_end());
    with_query(YAHOO_BASE, &[
        ("v", "60"),
        ("title", event.title.as_str()),
        ("st", start.as_str()),
        ("et", end.as_str()),
        ("desc", description(event)),
        ("in_loc", location(event)),
    ])
}

// outlook.live.com and outlook.office.com share the compose deeplink format
fn outlook_link(base: &str, event: &CalendarEvent) -> String {
    let start = format_utc_extended(&event.start_time);
    let end = format_utc_extended(&event.effective_end());
    with_query(base, &[
        ("path", "/calendar/action/compose"),
        ("rru", "addevent"),
        ("subject", event.title.as_str()),
        ("startdt", start.as_str()),
        ("enddt", end.as_str()),
        ("body", description(event)),
        ("location", location(event)),
    ])
}

fn description(event: &CalendarEvent) -> &str {
    event.description.as_deref().unwrap_or("")
}

fn location(event: &CalendarEvent) -> &str {
    event.location.as_deref().unwrap_or("")
}

fn format_utc_extended(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

fn with_query(base: &str, params: &[(&str, &str)]) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("{}?{}", base, query)
}
