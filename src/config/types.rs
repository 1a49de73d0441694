//! Core configuration types

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Process runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Session configuration (pool sampling, countdown)
    #[serde(default)]
    pub session: SessionConfig,
    /// Lockdown configuration
    #[serde(default)]
    pub lockdown: LockdownConfig,
}

/// Process runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Interpreter binary, looked up in PATH unless absolute
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
    /// Hard wall-clock timeout for interactive runs
    #[serde(default = "default_hard_timeout", with = "humantime_serde")]
    pub hard_timeout: Duration,
    /// Timeout for the non-interactive smoke run
    #[serde(default = "default_smoke_timeout", with = "humantime_serde")]
    pub smoke_timeout: Duration,
    /// Timeout for the pre-launch syntax check
    #[serde(default = "default_syntax_timeout", with = "humantime_serde")]
    pub syntax_timeout: Duration,
    /// Maximum bytes retained in the output log
    #[serde(default = "default_max_output")]
    pub max_output_bytes: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            interpreter: default_interpreter(),
            hard_timeout: default_hard_timeout(),
            smoke_timeout: default_smoke_timeout(),
            syntax_timeout: default_syntax_timeout(),
            max_output_bytes: default_max_output(),
        }
    }
}

fn default_interpreter() -> String {
    "python3".to_string()
}

fn default_hard_timeout() -> Duration {
    Duration::from_secs(15 * 60)
}

fn default_smoke_timeout() -> Duration {
    Duration::from_secs(2)
}

fn default_syntax_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_max_output() -> usize {
    1024 * 1024 // 1MB
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How many exercises are drawn into the visible pool
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    /// The shared countdown for the whole session
    #[serde(default = "default_countdown", with = "humantime_serde")]
    pub countdown: Duration,
    /// Sampling seed; random when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            pool_size: default_pool_size(),
            countdown: default_countdown(),
            seed: None,
        }
    }
}

fn default_pool_size() -> usize {
    5
}

fn default_countdown() -> Duration {
    Duration::from_secs(20 * 60)
}

/// Lockdown configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockdownConfig {
    /// Go full-screen while exam-locked
    #[serde(default = "default_true")]
    pub full_screen: bool,
    /// Attempt the global key-block hook while guarded
    #[serde(default = "default_true")]
    pub global_key_block: bool,
}

impl Default for LockdownConfig {
    fn default() -> Self {
        LockdownConfig {
            full_screen: true,
            global_key_block: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.runner.interpreter, "python3");
        assert_eq!(config.runner.hard_timeout, Duration::from_secs(900));
        assert_eq!(config.runner.smoke_timeout, Duration::from_secs(2));
        assert_eq!(config.session.pool_size, 5);
        assert_eq!(config.session.countdown, Duration::from_secs(1200));
        assert!(config.session.seed.is_none());
        assert!(config.lockdown.full_screen);
    }

    #[test]
    fn test_toml_durations() {
        let config: Config = toml::from_str(
            r#"
            [runner]
            hard_timeout = "10m"
            smoke_timeout = "500ms"

            [session]
            pool_size = 3
            countdown = "5m"
            seed = 42
            "#,
        )
        .unwrap();
        assert_eq!(config.runner.hard_timeout, Duration::from_secs(600));
        assert_eq!(config.runner.smoke_timeout, Duration::from_millis(500));
        assert_eq!(config.session.pool_size, 3);
        assert_eq!(config.session.seed, Some(42));
    }
}
