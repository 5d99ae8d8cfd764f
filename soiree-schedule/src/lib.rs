//! Party schedule for Soiree.
//!
//! Caches the upcoming-dates window queried from the remote store, and
//! runs the periodic credential probe that exercises the same path.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod schedule;
mod watch;

pub use schedule::{Schedule, ScheduleConfig};
pub use watch::spawn_credential_watch;
