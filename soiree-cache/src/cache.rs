//! Generic string-keyed TTL cache with optional async loader.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::{Mutex, RwLock};
use tracing::debug;

use soiree_core::error::{Result, SoireeError};

/// Computes the value for a missing or expired key.
///
/// A loader is fixed at cache construction and invoked at most once per
/// key at a time, however many callers are waiting.
#[async_trait]
pub trait Loader<V>: Send + Sync {
    /// Fetches the value for `key` from the backing source.
    async fn load(&self, key: &str) -> Result<V>;
}

/// One cached value and the instant it stops being fresh.
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    /// Fresh strictly before `expires_at`; the boundary itself is stale.
    fn is_fresh(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

type SharedLoad<V> = Shared<BoxFuture<'static, Result<V>>>;

/// Generic in-memory TTL cache keyed by opaque strings.
///
/// Entries expire a fixed `ttl` after they were written; expired entries
/// are treated as absent on read and linger until overwritten. Keys are
/// used verbatim: canonicalize case and format before calling in.
///
/// A cache built with a loader populates itself on [`get`](Self::get)
/// misses; concurrent misses for one key share a single loader call.
/// A cache without a loader only ever holds what was
/// [`store`](Self::store)d explicitly.
///
/// Handles are cheap clones of one shared instance and can be handed to
/// every request task plus any background tasks.
pub struct TtlCache<V> {
    inner: Arc<Inner<V>>,
}

impl<V> Clone for TtlCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<V> {
    ttl: Duration,
    loader: Option<Arc<dyn Loader<V>>>,
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    /// One shared load future per key currently being populated.
    inflight: Mutex<HashMap<String, SharedLoad<V>>>,
}

impl<V> TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Creates a loader-less cache: only explicit stores populate it, and
    /// a miss is [`SoireeError::NotFound`].
    pub fn new(ttl: Duration) -> Self {
        Self::build(ttl, None)
    }

    /// Creates a cache that fills misses through `loader`.
    pub fn with_loader(ttl: Duration, loader: Arc<dyn Loader<V>>) -> Self {
        Self::build(ttl, Some(loader))
    }

    fn build(ttl: Duration, loader: Option<Arc<dyn Loader<V>>>) -> Self {
        Self {
            inner: Arc::new(Inner {
                ttl,
                loader,
                entries: RwLock::new(HashMap::new()),
                inflight: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Returns the fresh cached value for `key`, loading it on miss.
    ///
    /// With a loader: a miss or stale entry triggers one loader call
    /// shared by every concurrent `get` of the same key; the result is
    /// stored with a fresh expiration and returned to all of them. A
    /// loader failure reaches all waiters as
    /// [`SoireeError::LoaderFailure`], nothing is cached, and any stale
    /// entry stays untouched.
    ///
    /// Without a loader, a miss is [`SoireeError::NotFound`].
    pub async fn get(&self, key: &str) -> Result<V> {
        if let Some(value) = self.fresh_value(key) {
            return Ok(value);
        }
        let Some(loader) = self.inner.loader.clone() else {
            return Err(SoireeError::NotFound(key.to_string()));
        };
        self.join_load(key, loader).await
    }

    /// Returns true iff a fresh entry exists for `key`.
    ///
    /// Never invokes the loader and never mutates the cache.
    pub fn has(&self, key: &str) -> bool {
        self.inner
            .entries
            .read()
            .get(key)
            .is_some_and(CacheEntry::is_fresh)
    }

    /// Inserts or overwrites the entry for `key` with a fresh expiration,
    /// bypassing the loader.
    pub fn store(&self, key: &str, value: V) {
        let expires_at = Instant::now() + self.inner.ttl;
        self.inner
            .entries
            .write()
            .insert(key.to_string(), CacheEntry { value, expires_at });
    }

    /// Number of entries held, fresh or stale.
    pub fn len(&self) -> usize {
        self.inner.entries.read().len()
    }

    /// Returns true if the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.inner.entries.read().is_empty()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.inner.entries.write().clear();
    }

    fn fresh_value(&self, key: &str) -> Option<V> {
        let entries = self.inner.entries.read();
        entries
            .get(key)
            .filter(|e| e.is_fresh())
            .map(|e| e.value.clone())
    }

    /// Joins the in-flight load for `key`, starting one if none exists.
    ///
    /// The loader runs in a spawned task: a waiter that times out or is
    /// dropped never cancels the load for the others, and a load whose
    /// waiters all vanished still completes and fills the cache. Locks
    /// are held for map bookkeeping only, never across the load itself,
    /// so lookups for unrelated keys proceed freely.
    fn join_load(&self, key: &str, loader: Arc<dyn Loader<V>>) -> SharedLoad<V> {
        let mut inflight = self.inner.inflight.lock();
        if let Some(load) = inflight.get(key) {
            debug!(key, "joining in-flight load");
            return load.clone();
        }
        // A concurrent load may have finished between the freshness check
        // in `get` and taking the in-flight lock.
        if let Some(value) = self.fresh_value(key) {
            return futures::future::ready(Ok(value)).boxed().shared();
        }

        debug!(key, "starting load");
        let task = {
            let inner = Arc::clone(&self.inner);
            let key = key.to_string();
            tokio::spawn(async move {
                let result = match loader.load(&key).await {
                    Ok(value) => {
                        let expires_at = Instant::now() + inner.ttl;
                        inner.entries.write().insert(
                            key.clone(),
                            CacheEntry {
                                value: value.clone(),
                                expires_at,
                            },
                        );
                        Ok(value)
                    }
                    // Failures are propagated, never cached: the next
                    // `get` retries the loader.
                    Err(source) => Err(SoireeError::LoaderFailure {
                        key: key.clone(),
                        source: Box::new(source),
                    }),
                };
                inner.inflight.lock().remove(&key);
                result
            })
        };

        let load: SharedLoad<V> = {
            let inner = Arc::clone(&self.inner);
            let key = key.to_string();
            async move {
                match task.await {
                    Ok(result) => result,
                    Err(join) => {
                        // The load task died before clearing its slot;
                        // clear it here so the next call can retry.
                        inner.inflight.lock().remove(&key);
                        Err(SoireeError::Internal(format!(
                            "load task for key '{key}' failed: {join}"
                        )))
                    }
                }
            }
            .boxed()
            .shared()
        };
        inflight.insert(key.to_string(), load.clone());
        load
    }
}
