use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use crate::domain::models::rsvp::Rsvp;

/// Read replica of the RSVPs last listed through an `RsvpStore`.
///
/// Successful writes are applied optimistically; any failed operation drops the
/// whole mirror. A loaded list is served for at most `max_age`, after which
/// the next list refetches. Writes by other processes are only picked up
/// on that refetch.
///
/// Every write bumps a generation counter; a fetched list is stored only if
/// no write landed since its generation was read.
pub struct RsvpCache {
    max_age: Duration,
    inner: RwLock<Mirror>,
}

#[derive(Default)]
struct Mirror {
    generation: u64,
    snapshot: Option<Snapshot>,
}

struct Snapshot {
    event_id: Option<String>,
    entries: Vec<Rsvp>,
    loaded_at: DateTime<Utc>,
}

impl Snapshot {
    fn covers(&self, rsvp: &Rsvp) -> bool {
        self.event_id.as_deref().is_none_or(|id| id == rsvp.event_id)
    }
}

impl RsvpCache {
    pub fn new(max_age: Duration) -> Self {
        Self {
            max_age,
            inner: RwLock::new(Mirror::default()),
        }
    }

    /// Cached entries for the given filter, if loaded for it and still fresh.
    pub async fn get(&self, event_id: Option<&str>, now: DateTime<Utc>) -> Option<Vec<Rsvp>> {
        let guard = self.inner.read().await;
        let snapshot = guard.snapshot.as_ref()?;
        if snapshot.event_id.as_deref() != event_id || now - snapshot.loaded_at > self.max_age {
            return None;
        }
        Some(snapshot.entries.clone())
    }

    /// Read before fetching; pass to [`RsvpCache::fill`].
    pub async fn generation(&self) -> u64 {
        self.inner.read().await.generation
    }

    /// Stores a fetched list unless a write happened since `seen` was read.
    pub async fn fill(&self, event_id: Option<&str>, entries: Vec<Rsvp>, now: DateTime<Utc>, seen: u64) -> bool {
        let mut guard = self.inner.write().await;
        if guard.generation != seen {
            return false;
        }
        guard.snapshot = Some(Snapshot {
            event_id: event_id.map(String::from),
            entries,
            loaded_at: now,
        });
        true
    }

    pub async fn prepend(&self, rsvp: &Rsvp) {
        let mut guard = self.inner.write().await;
        guard.generation += 1;
        if let Some(snapshot) = guard.snapshot.as_mut()
            && snapshot.covers(rsvp)
        {
            snapshot.entries.insert(0, rsvp.clone());
        }
    }

    pub async fn replace(&self, rsvp: &Rsvp) {
        let mut guard = self.inner.write().await;
        guard.generation += 1;
        if let Some(snapshot) = guard.snapshot.as_mut()
            && let Some(existing) = snapshot.entries.iter_mut().find(|r| r.id == rsvp.id)
        {
            *existing = rsvp.clone();
        }
    }

    pub async fn remove(&self, id: &str) {
        let mut guard = self.inner.write().await;
        guard.generation += 1;
        if let Some(snapshot) = guard.snapshot.as_mut() {
            snapshot.entries.retain(|r| r.id != id);
        }
    }

    pub async fn invalidate(&self) {
        let mut guard = self.inner.write().await;
        guard.generation += 1;
        guard.snapshot = None;
    }
}
