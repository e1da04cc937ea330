use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use crate::state::AppState;
use crate::api::extractors::current_user::Identity;
use crate::error::AppError;
use std::sync::Arc;

pub async fn weekly_report(
    State(state): State<Arc<AppState>>,
    Identity(user): Identity,
) -> Result<impl IntoResponse, AppError> {
    let report = state.weekly_reporter().report(&user, Utc::now()).await?;
    Ok(Json(report))
}
