/// The account on whose behalf a request runs, as resolved upstream.
/// Either part may be missing; callers treat that as "unresolved", not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: Option<String>,
    pub email: Option<String>,
}

impl CurrentUser {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            email: Some(email.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}
