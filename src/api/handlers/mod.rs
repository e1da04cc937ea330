pub mod calendar;
pub mod health;
pub mod invite;
pub mod report;
pub mod rsvp;
