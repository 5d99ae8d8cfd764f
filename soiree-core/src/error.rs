//! Error types for Soiree.
//!
//! One `thiserror` hierarchy shared by every crate in the workspace. The
//! enum is `Clone` (string payloads and boxed sources only) so a single
//! in-flight cache load can hand the same outcome to every waiter.

use thiserror::Error;

/// Result type alias using `SoireeError`.
pub type Result<T> = std::result::Result<T, SoireeError>;

/// Main error type for all Soiree operations.
#[derive(Debug, Clone, Error)]
pub enum SoireeError {
    // ═══════════════════════════════════════════════════════════════════════
    // CACHE ERRORS
    // ═══════════════════════════════════════════════════════════════════════
    /// Cache miss on a cache with no loader configured.
    #[error("no cached value for key: {0}")]
    NotFound(String),

    /// A loader invocation failed while populating a cache entry.
    #[error("load for key '{key}' failed: {source}")]
    LoaderFailure {
        /// Key the loader was invoked with.
        key: String,
        /// The loader's own error.
        #[source]
        source: Box<SoireeError>,
    },

    /// Malformed cache key (e.g. a non-numeric days-ahead key).
    #[error("invalid cache key: {0}")]
    InvalidKey(String),

    // ═══════════════════════════════════════════════════════════════════════
    // REMOTE STORE ERRORS
    // ═══════════════════════════════════════════════════════════════════════
    /// The remote store could not be reached or answered with a transient
    /// failure.
    #[error("remote store unavailable: {0}")]
    RemoteUnavailable(String),

    /// A remote call exceeded the caller's deadline.
    #[error("remote call timed out: {0}")]
    Timeout(String),

    /// RSVP confirmation presented a code that does not match the one on
    /// record.
    #[error("rsvp code mismatch for guest: {0}")]
    RsvpCodeMismatch(String),

    // ═══════════════════════════════════════════════════════════════════════
    // CONFIGURATION & INTERNAL ERRORS
    // ═══════════════════════════════════════════════════════════════════════
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal invariant violation (should never happen).
    #[error("internal error: {0}")]
    Internal(String),
}

impl SoireeError {
    /// Returns true if the failed operation is worth retrying: the remote
    /// store was unreachable or slow, possibly reported through a cache
    /// loader.
    pub fn is_retryable(&self) -> bool {
        match self {
            SoireeError::RemoteUnavailable(_) | SoireeError::Timeout(_) => true,
            SoireeError::LoaderFailure { source, .. } => source.is_retryable(),
            _ => false,
        }
    }

    /// Returns true if this error means the looked-up entity does not
    /// exist, as opposed to the lookup itself having failed.
    pub fn is_not_found(&self) -> bool {
        match self {
            SoireeError::NotFound(_) => true,
            SoireeError::LoaderFailure { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}
