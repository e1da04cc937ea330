use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{CreateRsvpRequest, ListRsvpsQuery, LookupRsvpQuery},
    responses::CountResponse,
};
use crate::api::extractors::current_user::Identity;
use crate::domain::models::rsvp::RsvpChanges;
use crate::domain::services::rsvp_store::RsvpStore;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

fn store_failure(store: &mut RsvpStore) -> AppError {
    store.take_error().unwrap_or(AppError::Internal)
}

pub async fn list_rsvps(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListRsvpsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut store = state.rsvp_store();
    match store.list(query.event_id.as_deref()).await {
        Some(rsvps) => Ok(Json(rsvps)),
        None => Err(store_failure(&mut store)),
    }
}

pub async fn create_rsvp(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateRsvpRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut store = state.rsvp_store();

    // Fast path; the unique (event_id, fan_id) constraint settles concurrent creates.
    if store.lookup(&payload.event_id, &payload.fan_id).await.is_some() {
        return Err(AppError::Conflict("Fan has already RSVP'd to this event".into()));
    }
    if let Some(e) = store.take_error() {
        return Err(e);
    }

    match store.create(payload.event_id, payload.fan_id, payload.status).await {
        Some(rsvp) => Ok(Json(rsvp)),
        None => Err(store_failure(&mut store)),
    }
}

pub async fn lookup_rsvp(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LookupRsvpQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut store = state.rsvp_store();
    match store.lookup(&query.event_id, &query.fan_id).await {
        Some(rsvp) => Ok(Json(rsvp)),
        None => Err(store.take_error().unwrap_or_else(|| AppError::NotFound("RSVP not found".into()))),
    }
}

pub async fn update_rsvp(
    State(state): State<Arc<AppState>>,
    Path(rsvp_id): Path<String>,
    Json(changes): Json<RsvpChanges>,
) -> Result<impl IntoResponse, AppError> {
    let mut store = state.rsvp_store();
    match store.update(&rsvp_id, &changes).await {
        Some(rsvp) => Ok(Json(rsvp)),
        None => Err(store_failure(&mut store)),
    }
}

pub async fn delete_rsvp(
    State(state): State<Arc<AppState>>,
    Path(rsvp_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut store = state.rsvp_store();
    if !store.delete(&rsvp_id).await {
        return Err(store_failure(&mut store));
    }
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn count_rsvps(
    State(state): State<Arc<AppState>>,
    Identity(user): Identity,
) -> Result<impl IntoResponse, AppError> {
    let mut store = state.rsvp_store();
    match store.count_for_user(&user).await {
        Some(count) => {
            info!("Counted {} RSVPs for {:?}", count, user.email);
            Ok(Json(CountResponse { count }))
        }
        None => Err(store_failure(&mut store)),
    }
}
