//! Common traits for Soiree.
//!
//! These traits define the interfaces that different implementations can
//! satisfy, enabling modularity and testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

/// Interface to the remote store holding the invite list and party dates.
///
/// Implementations might use:
/// - In-memory storage (for testing/development)
/// - A hosted document database (for production)
///
/// Every method is one remote round-trip; callers decide what to cache.
/// Transient failures surface as [`crate::SoireeError::RemoteUnavailable`]
/// or [`crate::SoireeError::Timeout`], never as a default value.
#[async_trait]
pub trait PartyStore: Send + Sync {
    /// Checks whether an identity is on the invite list.
    ///
    /// `Ok(false)` means the store answered and the guest does not exist;
    /// a failed check is an error, never `false`.
    async fn guest_exists(&self, email: &str) -> Result<bool>;

    /// Resolves a guest's display name.
    ///
    /// Returns [`crate::SoireeError::NotFound`] for unknown guests.
    async fn guest_name(&self, email: &str) -> Result<String>;

    /// Lists party dates in the window `[now+1d, now+1d+days_ahead]`,
    /// ascending.
    ///
    /// An empty window is a valid, empty result, not an error.
    async fn upcoming_dates(&self, days_ahead: u32) -> Result<Vec<DateTime<Utc>>>;

    /// Records pending RSVPs and the confirmation code for a guest.
    async fn create_rsvp(&self, email: &str, code: &str, dates: &[DateTime<Utc>]) -> Result<()>;

    /// Promotes a guest's pending RSVPs to confirmed when `code` matches
    /// the one on record.
    async fn confirm_rsvp(&self, email: &str, code: &str) -> Result<()>;
}
