//! Domain types for Soiree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A guest on the invite list.
///
/// Stored by the party store keyed by canonical email. Requested dates sit
/// in `pending_rsvps` until the guest confirms with their code, at which
/// point they move to `confirmed_rsvps`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    /// Canonical (trimmed, lower-cased) email address.
    pub email: String,
    /// Display name used on invitations.
    pub name: String,
    /// Party dates the guest asked to attend, not yet confirmed.
    #[serde(default)]
    pub pending_rsvps: Vec<DateTime<Utc>>,
    /// Party dates the guest has confirmed.
    #[serde(default)]
    pub confirmed_rsvps: Vec<DateTime<Utc>>,
    /// Code the guest must present to confirm pending RSVPs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsvp_code: Option<String>,
}

impl Guest {
    /// Creates a guest with no RSVPs. The email is canonicalized.
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: canonical_email(&email.into()),
            name: name.into(),
            pending_rsvps: Vec::new(),
            confirmed_rsvps: Vec::new(),
            rsvp_code: None,
        }
    }
}

/// Canonicalizes an identity key for lookups: trims surrounding whitespace
/// and lower-cases.
///
/// Caches never normalize keys themselves; every caller goes through this
/// before touching a cache or the store.
pub fn canonical_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}
