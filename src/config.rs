//! Server configuration from environment variables.
//!
//! - `HOST` (default `0.0.0.0`), `PORT` (default `8080`)
//! - `DATA_DIR`: when set, each session is saved there as `<session-id>.json` after every change
//! - `INACTIVITY_HOURS`: idle sessions older than this are dropped (default 12)

use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: Option<PathBuf>,
    pub inactivity_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            data_dir: None,
            inactivity_timeout: Duration::from_secs(12 * 3600),
        }
    }
}

impl Config {
    /// Read from the process environment; unset, unparsable or out-of-range values keep
    /// their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through `lookup` (key -> value) instead of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            data_dir: lookup("DATA_DIR")
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from),
            inactivity_timeout: lookup("INACTIVITY_HOURS")
                .and_then(|h| h.parse::<u64>().ok())
                .and_then(|h| h.checked_mul(3600))
                .map(Duration::from_secs)
                .unwrap_or(defaults.inactivity_timeout),
        }
    }
}
