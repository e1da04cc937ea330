use std::sync::Arc;
use chrono::Utc;
use crate::domain::{
    models::{identity::CurrentUser, rsvp::{Rsvp, RsvpChanges}},
    ports::RsvpRepository,
    services::rsvp_cache::RsvpCache,
};
use crate::error::AppError;
use tracing::{error, info};

/// Session-scoped access to RSVPs.
///
/// Failures from the repository never escape: the operation returns `None`
/// (or `false`) and the failure becomes this store's current error.
pub struct RsvpStore {
    repo: Arc<dyn RsvpRepository>,
    cache: Arc<RsvpCache>,
    error: Option<AppError>,
}

impl RsvpStore {
    pub fn new(repo: Arc<dyn RsvpRepository>, cache: Arc<RsvpCache>) -> Self {
        Self { repo, cache, error: None }
    }

    pub fn error(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    pub fn take_error(&mut self) -> Option<AppError> {
        self.error.take()
    }

    pub async fn list(&mut self, event_id: Option<&str>) -> Option<Vec<Rsvp>> {
        self.error = None;
        let now = Utc::now();
        if let Some(cached) = self.cache.get(event_id, now).await {
            return Some(cached);
        }

        let seen = self.cache.generation().await;
        let rows = self.repo.list(event_id).await;
        let rows = self.settle(rows).await?;
        self.cache.fill(event_id, rows.clone(), now, seen).await;
        Some(rows)
    }

    /// Inserts a new RSVP. An existing (event, fan) pair fails with a conflict.
    pub async fn create(&mut self, event_id: String, fan_id: String, status: Option<String>) -> Option<Rsvp> {
        self.error = None;
        let rsvp = Rsvp::new(event_id, fan_id, status);
        let created = self.repo.create(&rsvp).await;
        let created = self.settle(created).await?;

        info!("Created RSVP {} for fan {} on event {}", created.id, created.fan_id, created.event_id);
        self.cache.prepend(&created).await;
        Some(created)
    }

    pub async fn update(&mut self, id: &str, changes: &RsvpChanges) -> Option<Rsvp> {
        self.error = None;
        let found = self.repo.find_by_id(id).await;
        let mut rsvp = match self.settle(found).await? {
            Some(rsvp) => rsvp,
            None => {
                self.error = Some(AppError::NotFound(format!("RSVP {} not found", id)));
                return None;
            }
        };

        rsvp.apply(changes);
        let updated = self.repo.update(&rsvp).await;
        let updated = self.settle(updated).await?;

        info!("Updated RSVP {}", id);
        self.cache.replace(&updated).await;
        Some(updated)
    }

    pub async fn delete(&mut self, id: &str) -> bool {
        self.error = None;
        let deleted = self.repo.delete(id).await;
        if self.settle(deleted).await.is_none() {
            return false;
        }

        info!("Deleted RSVP {}", id);
        self.cache.remove(id).await;
        true
    }

    /// `None` with no error means the pair has no RSVP.
    pub async fn lookup(&mut self, event_id: &str, fan_id: &str) -> Option<Rsvp> {
        self.error = None;
        let found = self.repo.find_by_event_and_fan(event_id, fan_id).await;
        self.settle(found).await.flatten()
    }

    /// RSVPs across all events owned by the current user; zero when the user has no email.
    pub async fn count_for_user(&mut self, user: &CurrentUser) -> Option<i64> {
        self.error = None;
        let Some(email) = user.email.as_deref() else {
            return Some(0);
        };
        let count = self.repo.count_for_owner(email).await;
        self.settle(count).await
    }

    async fn settle<T>(&mut self, result: Result<T, AppError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                error!("RSVP store operation failed: {}", e);
                self.cache.invalidate().await;
                self.error = Some(e);
                None
            }
        }
    }
}
