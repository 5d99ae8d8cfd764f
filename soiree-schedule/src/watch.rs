//! Periodic credential probe against the remote store.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use soiree_core::traits::PartyStore;

/// A one-day window is enough to exercise the stored credentials.
const PROBE_DAYS_AHEAD: u32 = 1;

/// Starts the background credential watch.
///
/// Probes once immediately, then once per `period` plus probe latency
/// (the timer rearms only after a probe finishes). Each probe is one
/// read through the date-listing path, made purely to learn whether the
/// stored credentials still work: the outcome is logged and nothing
/// else happens. Expired credentials are rotated out-of-band, and probe
/// results never touch the request-serving caches.
///
/// Runs until the process exits or the returned handle is aborted.
pub fn spawn_credential_watch(store: Arc<dyn PartyStore>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match store.upcoming_dates(PROBE_DAYS_AHEAD).await {
                Ok(_) => debug!("store credentials are valid"),
                Err(err) => warn!(error = %err, "credential probe failed, check store credentials"),
            }
            tokio::time::sleep(period).await;
        }
    })
}
