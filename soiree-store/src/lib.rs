//! Party store implementations for Soiree.
//!
//! Currently an in-memory store suitable for development, testing, and
//! single-process deployments. Production deployments implement
//! [`soiree_core::PartyStore`] against their own backing database.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod memory;

pub use memory::MemoryStore;
