use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::task::DEFAULT_DESCRIPTION_MAX_BYTES;

/// Default number of task slots when `TASKHEAP_CAPACITY` is unset.
pub const DEFAULT_CAPACITY: usize = 16;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

/// Parse a profiled numeric var, keeping the default when the value is malformed.
fn profiled_env_parse<T>(profile: &str, key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match profiled_env_opt(profile, key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "unparseable config value, using default");
            default
        }),
        None => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub queue: QueueConfig,
    pub log: LogConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `TASKHEAP_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("TASKHEAP_PROFILE", "");
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.trim().to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            queue: QueueConfig::from_env_profiled(p),
            log: LogConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  queue:  capacity={}, description_max_bytes={}",
            self.queue.capacity,
            self.queue.description_max_bytes
        );
        tracing::info!("  log:    filter={}", self.log.filter);
    }
}

// ── Queue ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Fixed number of task slots; zero is rejected when the queue is built.
    pub capacity: usize,
    /// Byte bound applied to every inserted description.
    pub description_max_bytes: usize,
}

impl QueueConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            capacity: profiled_env_parse(p, "TASKHEAP_CAPACITY", DEFAULT_CAPACITY),
            description_max_bytes: profiled_env_parse(
                p,
                "TASKHEAP_DESCRIPTION_MAX_BYTES",
                DEFAULT_DESCRIPTION_MAX_BYTES,
            ),
        }
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            description_max_bytes: DEFAULT_DESCRIPTION_MAX_BYTES,
        }
    }
}

// ── Logging ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl LogConfig {
    /// Resolve only the log filter. Reads no numeric keys, so it never warns
    /// and can run before a subscriber exists.
    pub fn for_profile(profile: &str) -> Self {
        Self::from_env_profiled(&profile.trim().to_uppercase())
    }

    fn from_env_profiled(p: &str) -> Self {
        Self {
            filter: profiled_env_or(p, "TASKHEAP_LOG", "warn"),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    /// In-memory sink for formatted log lines.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    // Each test uses its own profile prefix so parallel tests never share keys.

    #[test]
    fn test_profile_values_override_defaults() {
        env::set_var("CFGA_TASKHEAP_CAPACITY", "42");
        env::set_var("CFGA_TASKHEAP_DESCRIPTION_MAX_BYTES", "10");
        env::set_var("CFGA_TASKHEAP_LOG", "debug");

        let config = Config::for_profile("cfga");
        assert_eq!(config.profile, "CFGA");
        assert_eq!(config.queue.capacity, 42);
        assert_eq!(config.queue.description_max_bytes, 10);
        assert_eq!(config.log.filter, "debug");
    }

    #[test]
    fn test_malformed_number_falls_back_to_default() {
        env::set_var("CFGB_TASKHEAP_CAPACITY", "-3");
        env::set_var("CFGB_TASKHEAP_DESCRIPTION_MAX_BYTES", "lots");

        let config = Config::for_profile("CFGB");
        assert_eq!(config.queue.capacity, DEFAULT_CAPACITY);
        assert_eq!(
            config.queue.description_max_bytes,
            DEFAULT_DESCRIPTION_MAX_BYTES
        );
    }

    #[test]
    fn test_malformed_number_emits_warning() {
        env::set_var("CFGD_TASKHEAP_CAPACITY", "lots");

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let config = tracing::subscriber::with_default(subscriber, || Config::for_profile("CFGD"));

        assert_eq!(config.queue.capacity, DEFAULT_CAPACITY);
        let output = logs.contents();
        assert!(output.contains("unparseable config value"), "logs: {output}");
        assert!(output.contains("TASKHEAP_CAPACITY"));
    }

    #[test]
    fn test_log_config_for_profile() {
        env::set_var("CFGE_TASKHEAP_LOG", "taskheap=trace");
        assert_eq!(LogConfig::for_profile("cfge").filter, "taskheap=trace");
    }

    #[test]
    fn test_empty_value_is_treated_as_unset() {
        env::set_var("CFGC_TASKHEAP_LOG", "");
        let config = Config::for_profile("CFGC");
        assert_eq!(config.log.filter, LogConfig::default().filter);
    }

    #[test]
    fn test_profile_label() {
        assert_eq!(Config::default().profile_label(), "default");
        assert_eq!(Config::for_profile(" staging ").profile_label(), "STAGING");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.queue.capacity, DEFAULT_CAPACITY);
        assert_eq!(config.queue.description_max_bytes, 99);
        assert_eq!(config.log.filter, "warn");
    }
}
