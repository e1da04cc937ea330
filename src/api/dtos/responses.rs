use crate::domain::models::delivery::{InviteNotice, InviteState};
use serde::Serialize;

#[derive(Serialize)]
pub struct InviteOutcomeResponse {
    pub state: InviteState,
    pub notice: Option<InviteNotice>,
    pub confirmation_required: bool,
}

#[derive(Serialize)]
pub struct CountResponse {
    pub count: i64,
}
