pub mod calendar_event;
pub mod delivery;
pub mod fan;
pub mod identity;
pub mod report;
pub mod rsvp;
