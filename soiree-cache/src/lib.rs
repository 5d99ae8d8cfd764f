//! TTL cache for Soiree lookups.
//!
//! Generic in-memory cache with per-instance expiration and optional
//! async loaders, shared by the membership gate and the schedule.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;

pub use cache::{Loader, TtlCache};
