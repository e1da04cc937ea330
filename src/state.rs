use std::sync::Arc;
use crate::domain::ports::{RsvpRepository, FanRepository, FanReportRepository, InviteTransport};
use crate::domain::services::{
    invite_delivery::InviteDelivery, rsvp_cache::RsvpCache, rsvp_store::RsvpStore,
    weekly_report::WeeklyReporter,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub rsvp_repo: Arc<dyn RsvpRepository>,
    pub fan_repo: Arc<dyn FanRepository>,
    pub report_repo: Arc<dyn FanReportRepository>,
    pub invite_transport: Arc<dyn InviteTransport>,
    pub rsvp_cache: Arc<RsvpCache>,
}

impl AppState {
    /// A store for one request, sharing the process-wide RSVP mirror.
    pub fn rsvp_store(&self) -> RsvpStore {
        RsvpStore::new(self.rsvp_repo.clone(), self.rsvp_cache.clone())
    }

    pub fn invite_delivery(&self) -> InviteDelivery {
        InviteDelivery::new(self.invite_transport.clone(), self.config.sender_name.clone())
    }

    pub fn weekly_reporter(&self) -> WeeklyReporter {
        WeeklyReporter::new(
            self.report_repo.clone(),
            self.config.report_timezone,
            self.config.report_week_start,
        )
    }
}
