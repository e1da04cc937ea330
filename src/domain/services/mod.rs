pub mod calendar;
pub mod invite_delivery;
pub mod provider_links;
pub mod rsvp_cache;
pub mod rsvp_store;
pub mod weekly_report;
