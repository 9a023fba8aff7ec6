use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use riskline::config::Config;
use riskline::error::{ConfigError, Error};

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn write_temp_config(contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let suffix = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!("riskline-config-test-{nanos}-{suffix}.toml"));
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let config = Config::load("/definitely/not/here/riskline.toml").expect("defaults");
    assert_eq!(config.database.url, "riskline.db");
    assert_eq!(config.worker.idle_timeout_secs, 5);
    assert_eq!(config.worker.max_attempts, 5);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn partial_config_keeps_defaults_for_the_rest() {
    let toml = r#"
[database]
url = "/var/lib/riskline/engine.db"

[worker]
max_attempts = 8
"#;
    let path = write_temp_config(toml);
    let config = Config::load(&path).expect("valid config");
    let _ = fs::remove_file(&path);

    assert_eq!(config.database.url, "/var/lib/riskline/engine.db");
    assert_eq!(config.worker.max_attempts, 8);
    assert_eq!(config.worker.backoff_secs, 1);
    assert_eq!(config.oracle.base_url, "http://localhost:8001");
}

#[test]
fn rejects_invalid_oracle_url() {
    let toml = r#"
[oracle]
base_url = "not a url"
"#;
    let path = write_temp_config(toml);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    match result {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "oracle.base_url",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid base_url error, got {err}"),
        Ok(_) => panic!("Expected invalid base_url to be rejected"),
    }
}

#[test]
fn rejects_zero_timeouts_and_attempts() {
    for (section, toml) in [
        (
            "oracle.timeout_secs",
            "[oracle]\ntimeout_secs = 0\n",
        ),
        (
            "worker.idle_timeout_secs",
            "[worker]\nidle_timeout_secs = 0\n",
        ),
        ("worker.max_attempts", "[worker]\nmax_attempts = 0\n"),
        (
            "worker.poll_interval_ms",
            "[worker]\npoll_interval_ms = 0\n",
        ),
    ] {
        let path = write_temp_config(toml);
        let result = Config::load(&path);
        let _ = fs::remove_file(&path);

        match result {
            Err(Error::Config(ConfigError::InvalidValue { field, .. })) => {
                assert_eq!(field, section);
            }
            other => panic!("Expected {section} to be rejected, got {other:?}"),
        }
    }
}

#[test]
fn rejects_unparseable_toml() {
    let path = write_temp_config("not = [valid");
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn durations_convert_from_config_units() {
    let config = Config::default();
    assert_eq!(config.idle_timeout(), std::time::Duration::from_secs(5));
    assert_eq!(config.backoff(), std::time::Duration::from_secs(1));
    assert_eq!(config.oracle_timeout(), std::time::Duration::from_secs(5));
    assert_eq!(
        config.poll_interval(),
        std::time::Duration::from_millis(100)
    );
}
