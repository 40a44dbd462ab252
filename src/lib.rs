//! Scheduling-assistant backend: offers free slots from a host's catalog and
//! books meetings into them on Google Calendar.

pub mod api;
pub mod cli;
pub mod core;
pub mod google;
pub mod scheduling;
