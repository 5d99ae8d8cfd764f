//! Allow-list checks with asymmetric positive/negative caching.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use soiree_cache::{Loader, TtlCache};
use soiree_core::error::Result;
use soiree_core::traits::PartyStore;
use soiree_core::types::canonical_email;

const DEFAULT_NAME_TTL: Duration = Duration::from_secs(24 * 60 * 60);
const DEFAULT_DENIAL_TTL: Duration = Duration::from_secs(5 * 60);

/// Gate configuration.
#[derive(Clone, Debug)]
pub struct GateConfig {
    /// TTL for cached display names (the positive cache).
    pub name_ttl: Duration,
    /// TTL for cached denials (the negative cache). Bounds how long a
    /// freshly invited guest can still be turned away.
    pub denial_ttl: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            name_ttl: DEFAULT_NAME_TTL,
            denial_ttl: DEFAULT_DENIAL_TTL,
        }
    }
}

impl GateConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display-name TTL.
    pub fn name_ttl(mut self, ttl: Duration) -> Self {
        self.name_ttl = ttl;
        self
    }

    /// Sets the denial TTL.
    pub fn denial_ttl(mut self, ttl: Duration) -> Self {
        self.denial_ttl = ttl;
        self
    }
}

/// Invite-list membership gate.
///
/// Two caches front the remote store:
///
/// - the **positive** cache maps identities to display names, has a long
///   TTL, and fills itself only through [`display_name`](Self::display_name);
/// - the **negative** cache records identities the store said do not
///   exist, has a short TTL and no loader, and is written on every
///   failed existence check.
///
/// Denied identities (spammed or guessed addresses) are the repeated
/// expensive case, so they get the explicit write-through cache; known
/// guests get cached incidentally when their name is resolved for an
/// invitation.
pub struct GuestGate {
    store: Arc<dyn PartyStore>,
    names: TtlCache<String>,
    denials: TtlCache<bool>,
}

impl GuestGate {
    /// Creates a gate with default TTLs (names 24 h, denials 5 min).
    pub fn new(store: Arc<dyn PartyStore>) -> Self {
        Self::with_config(store, GateConfig::default())
    }

    /// Creates a gate with custom TTLs.
    pub fn with_config(store: Arc<dyn PartyStore>, config: GateConfig) -> Self {
        let names = TtlCache::with_loader(
            config.name_ttl,
            Arc::new(NameLoader {
                store: Arc::clone(&store),
            }),
        );
        let denials = TtlCache::new(config.denial_ttl);
        Self {
            store,
            names,
            denials,
        }
    }

    /// Decides whether `email` is on the invite list.
    ///
    /// Consults the negative cache, then the positive cache, and only
    /// then the remote store; a "does not exist" answer is cached so
    /// repeats within the denial TTL never reach the store. Errors
    /// propagate uncached — callers must treat them as "not allowed",
    /// never as an implicit yes.
    #[instrument(skip(self))]
    pub async fn is_allowed(&self, email: &str) -> Result<bool> {
        let key = canonical_email(email);
        if self.denials.has(&key) {
            debug!(%key, "denied from negative cache");
            return Ok(false);
        }
        if self.names.has(&key) {
            debug!(%key, "allowed from positive cache");
            return Ok(true);
        }
        let exists = self.store.guest_exists(&key).await?;
        if !exists {
            // Only the denial is cached here; the positive cache fills
            // as a side effect of name resolution.
            self.denials.store(&key, false);
        }
        debug!(%key, exists, "existence checked against store");
        Ok(exists)
    }

    /// Resolves the guest's display name, caching it for the name TTL.
    ///
    /// This is the only path that populates the positive cache.
    #[instrument(skip(self))]
    pub async fn display_name(&self, email: &str) -> Result<String> {
        self.names.get(&canonical_email(email)).await
    }
}

/// Positive-cache loader: resolves a display name from the store.
struct NameLoader {
    store: Arc<dyn PartyStore>,
}

#[async_trait]
impl Loader<String> for NameLoader {
    async fn load(&self, key: &str) -> Result<String> {
        self.store.guest_name(key).await
    }
}
