use axum::{extract::State, http::StatusCode, response::{IntoResponse, Response}, Json};
use crate::state::AppState;
use crate::api::dtos::{requests::SendInviteRequest, responses::InviteOutcomeResponse};
use crate::domain::models::delivery::InviteState;
use crate::domain::services::invite_delivery::InviteDelivery;
use std::sync::Arc;

pub async fn send_invite(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SendInviteRequest>,
) -> Response {
    let (policy, request) = payload.into_parts();
    let policy = policy.unwrap_or(state.config.delivery_policy);

    let mut delivery = state.invite_delivery();
    delivery.apply_policy(policy, &request).await;
    outcome_response(&delivery)
}

/// The user accepted an "ask" prompt; dispatch regardless of policy.
pub async fn confirm_invite(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SendInviteRequest>,
) -> Response {
    let (_, request) = payload.into_parts();

    let mut delivery = state.invite_delivery();
    delivery.confirm(&request).await;
    outcome_response(&delivery)
}

fn outcome_response(delivery: &InviteDelivery) -> Response {
    let status = match delivery.state() {
        InviteState::Failed => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };
    let body = InviteOutcomeResponse {
        state: delivery.state(),
        notice: delivery.notice().cloned(),
        confirmation_required: delivery.confirmation_visible(),
    };
    (status, Json(body)).into_response()
}
