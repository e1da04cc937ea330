use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use std::convert::Infallible;
use crate::domain::models::identity::CurrentUser;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// Reads the identity forwarded by the upstream session layer.
/// Missing headers yield an unresolved user rather than a rejection.
pub struct Identity(pub CurrentUser);

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts.headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        Ok(Identity(CurrentUser {
            user_id: header(USER_ID_HEADER),
            email: header(USER_EMAIL_HEADER),
        }))
    }
}
