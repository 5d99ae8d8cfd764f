//! In-memory party store.
//!
//! Fast, thread-safe storage suitable for development, testing, and
//! single-process deployments.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::{debug, instrument};

use soiree_core::error::{Result, SoireeError};
use soiree_core::traits::PartyStore;
use soiree_core::types::Guest;

/// In-memory party store.
///
/// Guests are keyed by canonical email; party dates are a flat list the
/// date-window query filters at read time.
///
/// # Failure injection
///
/// [`set_offline`](Self::set_offline) makes every operation fail with
/// [`SoireeError::RemoteUnavailable`], and
/// [`remote_reads`](Self::remote_reads) counts read attempts — together
/// they let cache and watch-loop tests observe exactly how often the
/// "remote" was hit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Canonical email → guest record.
    guests: DashMap<String, Guest>,
    /// Scheduled party dates, unordered.
    dates: RwLock<Vec<DateTime<Utc>>>,
    /// Read attempts (exists, name, dates), offline or not.
    reads: AtomicUsize,
    offline: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the given guests.
    pub fn with_guests(guests: impl IntoIterator<Item = Guest>) -> Self {
        let store = Self::new();
        for guest in guests {
            store.add_guest(guest);
        }
        store
    }

    /// Adds or replaces a guest, keyed by their canonical email.
    pub fn add_guest(&self, guest: Guest) {
        self.guests.insert(guest.email.clone(), guest);
    }

    /// Schedules party dates.
    pub fn add_dates(&self, dates: impl IntoIterator<Item = DateTime<Utc>>) {
        self.dates.write().extend(dates);
    }

    /// Returns the guest record for `email`, if any.
    pub fn guest(&self, email: &str) -> Option<Guest> {
        self.guests.get(email).map(|g| g.value().clone())
    }

    /// Number of guests on the invite list.
    pub fn len(&self) -> usize {
        self.guests.len()
    }

    /// Returns true if no guests are stored.
    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }

    /// Drops all guests and dates.
    pub fn clear(&self) {
        self.guests.clear();
        self.dates.write().clear();
    }

    /// Toggles offline mode: while set, every operation fails with
    /// [`SoireeError::RemoteUnavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of read attempts (existence checks, name lookups, date
    /// listings) made against the store so far.
    pub fn remote_reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(SoireeError::RemoteUnavailable("store is offline".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PartyStore for MemoryStore {
    async fn guest_exists(&self, email: &str) -> Result<bool> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        Ok(self.guests.contains_key(email))
    }

    async fn guest_name(&self, email: &str) -> Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        self.guests
            .get(email)
            .map(|g| g.name.clone())
            .ok_or_else(|| SoireeError::NotFound(email.to_string()))
    }

    async fn upcoming_dates(&self, days_ahead: u32) -> Result<Vec<DateTime<Utc>>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        let start = Utc::now() + ChronoDuration::days(1);
        let end = start + ChronoDuration::days(i64::from(days_ahead));
        let mut upcoming: Vec<DateTime<Utc>> = self
            .dates
            .read()
            .iter()
            .copied()
            .filter(|d| *d >= start && *d <= end)
            .collect();
        upcoming.sort_unstable();
        debug!(days_ahead, count = upcoming.len(), "listed upcoming dates");
        Ok(upcoming)
    }

    #[instrument(skip(self, dates), fields(dates = dates.len()))]
    async fn create_rsvp(&self, email: &str, code: &str, dates: &[DateTime<Utc>]) -> Result<()> {
        self.check_online()?;
        let mut guest = self
            .guests
            .get_mut(email)
            .ok_or_else(|| SoireeError::NotFound(email.to_string()))?;
        guest.pending_rsvps = dates.to_vec();
        guest.rsvp_code = Some(code.to_string());
        debug!(email, "rsvp created");
        Ok(())
    }

    #[instrument(skip(self, code))]
    async fn confirm_rsvp(&self, email: &str, code: &str) -> Result<()> {
        self.check_online()?;
        let mut guest = self
            .guests
            .get_mut(email)
            .ok_or_else(|| SoireeError::NotFound(email.to_string()))?;
        if guest.rsvp_code.as_deref() != Some(code) {
            return Err(SoireeError::RsvpCodeMismatch(email.to_string()));
        }
        guest.confirmed_rsvps = guest.pending_rsvps.clone();
        debug!(email, "rsvp confirmed");
        Ok(())
    }
}
