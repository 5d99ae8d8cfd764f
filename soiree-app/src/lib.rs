//! # Soiree App
//!
//! Wires the Soiree core together: one injected [`soiree_core::PartyStore`],
//! the membership gate, the schedule cache, and the credential watch,
//! behind a single [`App`] handed to whatever front end serves requests.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use soiree_app::{App, AppConfig};
//! use soiree_store::MemoryStore;
//!
//! let app = App::new(Arc::new(MemoryStore::new()), AppConfig::from_env());
//! let _watch = app.start_credential_watch();
//! let allowed = app.is_allowed("ada@example.com").await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod app;
mod config;

pub use app::App;
pub use config::AppConfig;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the process-wide tracing subscriber.
///
/// Binaries embedding the core call this once at startup; `RUST_LOG`
/// overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "soiree=info,warn".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
