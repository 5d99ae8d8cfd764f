//! # Soiree Core
//!
//! Core types, errors, and traits for the Soiree RSVP service.
//!
//! This crate provides the foundational building blocks used by all other
//! Soiree crates:
//!
//! - **Types**: the guest record and identity-key canonicalization
//! - **Errors**: one error hierarchy with a `Result` alias
//! - **Traits**: the async store interface the caches and policies sit on
//!
//! ## Example
//!
//! ```rust
//! use soiree_core::{canonical_email, Guest};
//!
//! let guest = Guest::new("  Ada@Example.COM ", "Ada");
//! assert_eq!(guest.email, canonical_email("Ada@example.com"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{Result, SoireeError};
pub use traits::*;
pub use types::*;
