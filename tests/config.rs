//! Server configuration from environment values.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tennis_tournament_web::config::Config;

fn config_from(vars: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_when_unset() {
    assert_eq!(config_from(&[]), Config::default());
    assert_eq!(Config::default().port, 8080);
    assert_eq!(Config::default().inactivity_timeout, Duration::from_secs(12 * 3600));
}

#[test]
fn overrides_and_bad_values() {
    let config = config_from(&[
        ("HOST", "127.0.0.1"),
        ("PORT", "not-a-port"),
        ("DATA_DIR", "/var/lib/tennis"),
        ("INACTIVITY_HOURS", "2"),
    ]);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8080);
    assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/tennis")));
    assert_eq!(config.inactivity_timeout, Duration::from_secs(2 * 3600));

    assert_eq!(config_from(&[("DATA_DIR", "  ")]).data_dir, None);
}

#[test]
fn huge_inactivity_hours_keep_default() {
    let hours = u64::MAX.to_string();
    let config = config_from(&[("INACTIVITY_HOURS", hours.as_str())]);
    assert_eq!(config.inactivity_timeout, Config::default().inactivity_timeout);
}
