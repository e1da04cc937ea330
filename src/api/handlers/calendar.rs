use axum::{http::header, response::IntoResponse, Json};
use crate::domain::models::calendar_event::CalendarEvent;
use crate::domain::services::{
    calendar::{build_calendar_document, calendar_filename},
    provider_links::build_provider_links,
};
use tracing::info;

/// Hands the document to the client as a file download.
pub async fn download_document(Json(event): Json<CalendarEvent>) -> impl IntoResponse {
    let document = build_calendar_document(&event);
    let filename = calendar_filename(&event);
    info!("Built calendar document {} as {}", document.uid(), filename);

    (
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
        ],
        document.to_ics_string(),
    )
}

pub async fn provider_links(Json(event): Json<CalendarEvent>) -> impl IntoResponse {
    Json(build_provider_links(&event))
}
