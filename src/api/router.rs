use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::extractors::current_user::USER_ID_HEADER;
use crate::api::handlers::{health, calendar, invite, rsvp, report};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Calendar documents & deep links
        .route("/api/v1/calendar/document", post(calendar::download_document))
        .route("/api/v1/calendar/links", post(calendar::provider_links))

        // Invite delivery
        .route("/api/v1/invites", post(invite::send_invite))
        .route("/api/v1/invites/confirm", post(invite::confirm_invite))

        // RSVPs
        .route("/api/v1/rsvps", get(rsvp::list_rsvps).post(rsvp::create_rsvp))
        .route("/api/v1/rsvps/lookup", get(rsvp::lookup_rsvp))
        .route("/api/v1/rsvps/count", get(rsvp::count_rsvps))
        .route("/api/v1/rsvps/{rsvp_id}", put(rsvp::update_rsvp).delete(rsvp::delete_rsvp))

        // Reporting
        .route("/api/v1/reports/weekly", get(report::weekly_report))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    let user_id = request.headers()
                        .get(USER_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("")
                        .to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = %user_id,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
