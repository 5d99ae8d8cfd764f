//! Cached view of the upcoming party dates.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use soiree_cache::{Loader, TtlCache};
use soiree_core::error::{Result, SoireeError};
use soiree_core::traits::PartyStore;

const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Schedule configuration.
#[derive(Clone, Debug)]
pub struct ScheduleConfig {
    /// How long a listed window stays fresh. A shorter TTL trades remote
    /// load for freshness.
    pub cache_ttl: Duration,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

impl ScheduleConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window TTL.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}

/// Cached upcoming-dates lookups, keyed by the serialized days-ahead
/// window size.
///
/// An empty window is an ordinary cached value: "no upcoming dates" is
/// remembered just as long as any other answer.
pub struct Schedule {
    dates: TtlCache<Vec<DateTime<Utc>>>,
}

impl Schedule {
    /// Creates a schedule with the default TTL.
    pub fn new(store: Arc<dyn PartyStore>) -> Self {
        Self::with_config(store, ScheduleConfig::default())
    }

    /// Creates a schedule with a custom TTL.
    pub fn with_config(store: Arc<dyn PartyStore>, config: ScheduleConfig) -> Self {
        Self {
            dates: TtlCache::with_loader(config.cache_ttl, Arc::new(DatesLoader { store })),
        }
    }

    /// Returns the party dates in the window `[now+1d, now+1d+days_ahead]`,
    /// fetching from the store at most once per TTL per window size.
    pub async fn upcoming_dates(&self, days_ahead: u32) -> Result<Vec<DateTime<Utc>>> {
        self.dates.get(&days_ahead.to_string()).await
    }
}

/// Cache loader: parses the serialized days-ahead key back to its window
/// size and queries the store.
struct DatesLoader {
    store: Arc<dyn PartyStore>,
}

#[async_trait]
impl Loader<Vec<DateTime<Utc>>> for DatesLoader {
    async fn load(&self, key: &str) -> Result<Vec<DateTime<Utc>>> {
        let days_ahead: u32 = key
            .parse()
            .map_err(|_| SoireeError::InvalidKey(key.to_string()))?;
        self.store.upcoming_dates(days_ahead).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use soiree_store::MemoryStore;

    fn store_with_dates(days_out: &[i64]) -> Arc<MemoryStore> {
        let store = MemoryStore::new();
        let now = Utc::now();
        store.add_dates(days_out.iter().map(|d| now + ChronoDuration::days(*d)));
        Arc::new(store)
    }

    #[tokio::test]
    async fn test_window_is_cached() {
        let store = store_with_dates(&[2, 9, 16]);
        let schedule = Schedule::new(store.clone());

        let first = schedule.upcoming_dates(30).await.unwrap();
        let second = schedule.upcoming_dates(30).await.unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
        assert_eq!(store.remote_reads(), 1);
    }

    #[tokio::test]
    async fn test_empty_window_is_cached_too() {
        let store = store_with_dates(&[]);
        let schedule = Schedule::new(store.clone());

        assert!(schedule.upcoming_dates(30).await.unwrap().is_empty());
        assert!(schedule.upcoming_dates(30).await.unwrap().is_empty());
        assert_eq!(store.remote_reads(), 1);
    }

    #[tokio::test]
    async fn test_window_sizes_cache_independently() {
        let store = store_with_dates(&[2, 9, 16]);
        let schedule = Schedule::new(store.clone());

        assert_eq!(schedule.upcoming_dates(7).await.unwrap().len(), 1);
        assert_eq!(schedule.upcoming_dates(30).await.unwrap().len(), 3);
        assert_eq!(store.remote_reads(), 2);
    }

    #[tokio::test]
    async fn test_ttl_expiry_requeries() {
        let store = store_with_dates(&[2]);
        let schedule = Schedule::with_config(
            store.clone(),
            ScheduleConfig::new().cache_ttl(Duration::from_millis(1)),
        );

        schedule.upcoming_dates(30).await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        schedule.upcoming_dates(30).await.unwrap();
        assert_eq!(store.remote_reads(), 2);
    }

    #[tokio::test]
    async fn test_loader_rejects_garbage_keys() {
        let store = store_with_dates(&[]);
        let loader = DatesLoader { store };
        let err = loader.load("bananas").await.unwrap_err();
        assert!(matches!(err, SoireeError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let store = store_with_dates(&[2]);
        let schedule = Schedule::new(store.clone());
        store.set_offline(true);

        let err = schedule.upcoming_dates(30).await.unwrap_err();
        assert!(err.is_retryable());

        store.set_offline(false);
        assert_eq!(schedule.upcoming_dates(30).await.unwrap().len(), 1);
    }
}
