//! Configuration I/O - Loading and saving configuration
//!
//! Handles reading configuration from files and environment variables.

use std::path::Path;
use std::time::Duration;

use super::types::Config;
use crate::error::{Error, Result};

/// Load configuration with layered precedence:
/// 1. Config file (config.toml) if it exists, otherwise defaults
/// 2. Environment variable overrides (includes .env for convenience)
pub fn load_config() -> Result<Config> {
    let config_path = super::paths::config_path();

    let mut config = if config_path.exists() {
        load_config_from_path(&config_path)?
    } else {
        Config::default()
    };

    // Apply environment variable overrides (highest precedence)
    apply_env_overrides(&mut config);

    Ok(config)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;

    // Detect format by extension
    let config: Config = if path.extension().is_some_and(|ext| ext == "json") {
        // Parse as JSON5 (more lenient than strict JSON)
        json5::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid JSON config: {}", e)))?
    } else if path.extension().is_some_and(|ext| ext == "toml") {
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid TOML config: {}", e)))?
    } else {
        // Try TOML first, then JSON5
        toml::from_str(&content)
            .or_else(|_| json5::from_str(&content).map_err(|e| Error::Config(e.to_string())))
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?
    };

    Ok(config)
}

/// Save configuration to a specific path as TOML
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Apply environment variable overrides to an existing config.
///
/// Loads `.env` if present and overlays any set variables onto the config.
/// Env vars have the highest precedence: defaults < file < env.
pub fn apply_env_overrides(config: &mut Config) {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    if let Ok(interpreter) = std::env::var("EXAMSHELL_INTERPRETER") {
        config.runner.interpreter = interpreter;
    }
    if let Some(timeout) = env_duration("EXAMSHELL_HARD_TIMEOUT") {
        config.runner.hard_timeout = timeout;
    }
    if let Some(timeout) = env_duration("EXAMSHELL_SMOKE_TIMEOUT") {
        config.runner.smoke_timeout = timeout;
    }
    if let Some(countdown) = env_duration("EXAMSHELL_COUNTDOWN") {
        config.session.countdown = countdown;
    }
    if let Ok(size) = std::env::var("EXAMSHELL_POOL_SIZE") {
        if let Ok(size) = size.parse() {
            config.session.pool_size = size;
        }
    }
    if let Ok(seed) = std::env::var("EXAMSHELL_SEED") {
        if let Ok(seed) = seed.parse() {
            config.session.seed = Some(seed);
        }
    }
}

/// Parse a humantime duration (`"20m"`, `"2s"`) from an env var.
fn env_duration(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|v| humantime_serde::re::humantime::parse_duration(&v).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_toml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [session]
            pool_size = 2
            seed = 7
            "#,
        )
        .unwrap();

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.session.pool_size, 2);
        assert_eq!(config.session.seed, Some(7));
        // Untouched sections keep their defaults
        assert_eq!(config.runner.interpreter, "python3");
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.session.seed = Some(99);
        save_config(&config, &path).unwrap();

        let loaded = load_config_from_path(&path).unwrap();
        assert_eq!(loaded.session.seed, Some(99));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not valid toml [").unwrap();
        assert!(load_config_from_path(&path).is_err());
    }
}
