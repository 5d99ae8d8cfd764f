//! Membership gate for Soiree.
//!
//! Decides whether an identity is on the invite list, shielding the
//! remote store behind a short-lived negative cache and the long-lived
//! display-name cache.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod gate;

pub use gate::{GateConfig, GuestGate};
