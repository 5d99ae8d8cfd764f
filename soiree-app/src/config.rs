//! Application configuration.

use std::time::Duration;

const DEFAULT_DATES_TTL: Duration = Duration::from_secs(60 * 60);
const DEFAULT_WATCH_PERIOD: Duration = Duration::from_secs(60 * 60);
const DEFAULT_NAME_TTL: Duration = Duration::from_secs(24 * 60 * 60);
const DEFAULT_DENIAL_TTL: Duration = Duration::from_secs(5 * 60);

/// Top-level configuration for the Soiree core.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// TTL of the upcoming-dates cache.
    pub dates_cache_ttl: Duration,
    /// Interval between credential probes.
    pub watch_period: Duration,
    /// TTL of the display-name (positive) cache.
    pub name_ttl: Duration,
    /// TTL of the denial (negative) cache.
    pub denial_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dates_cache_ttl: DEFAULT_DATES_TTL,
            watch_period: DEFAULT_WATCH_PERIOD,
            name_ttl: DEFAULT_NAME_TTL,
            denial_ttl: DEFAULT_DENIAL_TTL,
        }
    }
}

impl AppConfig {
    /// Reads configuration from the environment (and a `.env` file when
    /// present), falling back to defaults for anything unset or
    /// unparseable.
    ///
    /// Recognized variables, all in whole seconds:
    /// `SOIREE_DATES_TTL_SECS`, `SOIREE_WATCH_PERIOD_SECS`,
    /// `SOIREE_NAME_TTL_SECS`, `SOIREE_DENIAL_TTL_SECS`.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            dates_cache_ttl: secs_var("SOIREE_DATES_TTL_SECS", DEFAULT_DATES_TTL),
            watch_period: secs_var("SOIREE_WATCH_PERIOD_SECS", DEFAULT_WATCH_PERIOD),
            name_ttl: secs_var("SOIREE_NAME_TTL_SECS", DEFAULT_NAME_TTL),
            denial_ttl: secs_var("SOIREE_DENIAL_TTL_SECS", DEFAULT_DENIAL_TTL),
        }
    }
}

fn secs_var(name: &str, default: Duration) -> Duration {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_defaults_and_overrides() {
        // One sequential test: env vars are process-global.
        std::env::remove_var("SOIREE_DATES_TTL_SECS");
        std::env::remove_var("SOIREE_WATCH_PERIOD_SECS");
        let config = AppConfig::from_env();
        assert_eq!(config.dates_cache_ttl, DEFAULT_DATES_TTL);
        assert_eq!(config.watch_period, DEFAULT_WATCH_PERIOD);

        std::env::set_var("SOIREE_DATES_TTL_SECS", "120");
        std::env::set_var("SOIREE_WATCH_PERIOD_SECS", "not-a-number");
        let config = AppConfig::from_env();
        assert_eq!(config.dates_cache_ttl, Duration::from_secs(120));
        // Garbage falls back to the default rather than failing startup.
        assert_eq!(config.watch_period, DEFAULT_WATCH_PERIOD);

        std::env::remove_var("SOIREE_DATES_TTL_SECS");
        std::env::remove_var("SOIREE_WATCH_PERIOD_SECS");
    }
}
