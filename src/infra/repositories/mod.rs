pub mod sqlite_rsvp_repo;
pub mod sqlite_fan_repo;
pub mod sqlite_report_repo;

pub mod postgres_rsvp_repo;
pub mod postgres_fan_repo;
pub mod postgres_report_repo;
