//! The assembled Soiree core.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::info;

use soiree_core::error::Result;
use soiree_core::traits::PartyStore;
use soiree_core::types::canonical_email;
use soiree_guest::{GateConfig, GuestGate};
use soiree_schedule::{spawn_credential_watch, Schedule, ScheduleConfig};

use crate::config::AppConfig;

/// The Soiree core, assembled.
///
/// Owns the process-wide caches and the store handle; request handlers
/// and the watch loop receive this by reference (or a clone of the
/// `Arc` it usually lives in) rather than reaching for globals, so tests
/// get a fresh instance each.
pub struct App {
    store: Arc<dyn PartyStore>,
    gate: GuestGate,
    schedule: Schedule,
    config: AppConfig,
}

impl App {
    /// Builds the core around an injected store.
    pub fn new(store: Arc<dyn PartyStore>, config: AppConfig) -> Self {
        let gate = GuestGate::with_config(
            Arc::clone(&store),
            GateConfig::new()
                .name_ttl(config.name_ttl)
                .denial_ttl(config.denial_ttl),
        );
        let schedule = Schedule::with_config(
            Arc::clone(&store),
            ScheduleConfig::new().cache_ttl(config.dates_cache_ttl),
        );
        info!(
            dates_ttl_secs = config.dates_cache_ttl.as_secs(),
            watch_period_secs = config.watch_period.as_secs(),
            "soiree core assembled"
        );
        Self {
            store,
            gate,
            schedule,
            config,
        }
    }

    /// Whether `email` is on the invite list. Errors mean "treat as not
    /// allowed", never "allowed by default".
    pub async fn is_allowed(&self, email: &str) -> Result<bool> {
        self.gate.is_allowed(email).await
    }

    /// The guest's display name, cached for the name TTL.
    pub async fn guest_name(&self, email: &str) -> Result<String> {
        self.gate.display_name(email).await
    }

    /// The party dates coming up in the next `days_ahead` days, cached.
    pub async fn upcoming_dates(&self, days_ahead: u32) -> Result<Vec<DateTime<Utc>>> {
        self.schedule.upcoming_dates(days_ahead).await
    }

    /// Records pending RSVPs for a guest. A confirmed action, so this
    /// writes straight through to the store.
    pub async fn create_rsvp(
        &self,
        email: &str,
        code: &str,
        dates: &[DateTime<Utc>],
    ) -> Result<()> {
        self.store
            .create_rsvp(&canonical_email(email), code, dates)
            .await
    }

    /// Confirms a guest's pending RSVPs with their code.
    pub async fn confirm_rsvp(&self, email: &str, code: &str) -> Result<()> {
        self.store.confirm_rsvp(&canonical_email(email), code).await
    }

    /// Starts the background credential watch at the configured period.
    pub fn start_credential_watch(&self) -> JoinHandle<()> {
        spawn_credential_watch(Arc::clone(&self.store), self.config.watch_period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use chrono::Duration as ChronoDuration;
    use soiree_core::types::Guest;
    use soiree_store::MemoryStore;

    fn seeded_app() -> (Arc<MemoryStore>, App) {
        let store = Arc::new(MemoryStore::with_guests([Guest::new(
            "ada@example.com",
            "Ada",
        )]));
        let now = Utc::now();
        store.add_dates([now + ChronoDuration::days(2), now + ChronoDuration::days(9)]);
        let app = App::new(store.clone(), AppConfig::default());
        (store, app)
    }

    #[tokio::test]
    async fn test_rsvp_round_trip() {
        let (store, app) = seeded_app();

        assert!(app.is_allowed("Ada@Example.com").await.unwrap());
        let name = app.guest_name("ada@example.com").await.unwrap();
        assert_eq!(name, "Ada");

        let dates = app.upcoming_dates(30).await.unwrap();
        assert_eq!(dates.len(), 2);

        app.create_rsvp("ADA@example.com", "tea-party", &dates)
            .await
            .unwrap();
        app.confirm_rsvp("ada@example.com", "tea-party")
            .await
            .unwrap();
        assert_eq!(
            store.guest("ada@example.com").unwrap().confirmed_rsvps,
            dates
        );
    }

    #[tokio::test]
    async fn test_unknown_guest_fails_closed() {
        let (store, app) = seeded_app();

        assert!(!app.is_allowed("mallory@example.com").await.unwrap());

        store.set_offline(true);
        // A store outage is an error, not a yes.
        assert!(app.is_allowed("trudy@example.com").await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_runs_at_configured_period() {
        let (store, app) = seeded_app();
        let _watch = app.start_credential_watch();

        tokio::time::sleep(Duration::from_millis(1)).await;
        let after_first = store.remote_reads();
        assert!(after_first >= 1);

        tokio::time::sleep(app.config.watch_period + Duration::from_secs(1)).await;
        assert_eq!(store.remote_reads(), after_first + 1);
    }
}
