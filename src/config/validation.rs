//! Configuration validation
//!
//! Validates configuration and reports issues.

use super::types::Config;
use crate::catalog::Catalog;

/// Result of configuration validation
#[derive(Debug, Clone, Default)]
pub struct ConfigValidationResult {
    /// Validation errors (critical)
    pub errors: Vec<String>,
    /// Validation warnings (non-critical)
    pub warnings: Vec<String>,
}

impl ConfigValidationResult {
    /// Whether the config is usable
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a configuration against the built-in catalog.
pub fn validate_config(config: &Config) -> ConfigValidationResult {
    let mut result = ConfigValidationResult::default();

    if config.session.pool_size == 0 {
        result
            .errors
            .push("session.pool_size must be at least 1".to_string());
    }
    let catalog = Catalog::builtin();
    if config.session.pool_size > catalog.len() {
        result.warnings.push(format!(
            "session.pool_size {} exceeds catalog size {}; the whole catalog will be visible",
            config.session.pool_size,
            catalog.len()
        ));
    }

    if config.runner.hard_timeout.is_zero() {
        result
            .errors
            .push("runner.hard_timeout must be non-zero".to_string());
    }
    if config.runner.smoke_timeout.is_zero() {
        result
            .errors
            .push("runner.smoke_timeout must be non-zero".to_string());
    }
    if config.session.countdown.is_zero() {
        result
            .errors
            .push("session.countdown must be non-zero".to_string());
    }

    // Interpreter resolution is a warning: the shell still starts, runs fail
    let interpreter = std::path::Path::new(&config.runner.interpreter);
    if !interpreter.is_absolute() && which::which(&config.runner.interpreter).is_err() {
        result.warnings.push(format!(
            "interpreter '{}' not found in PATH",
            config.runner.interpreter
        ));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let result = validate_config(&Config::default());
        assert!(result.valid());
    }

    #[test]
    fn test_zero_pool_rejected() {
        let mut config = Config::default();
        config.session.pool_size = 0;
        let result = validate_config(&config);
        assert!(!result.valid());
    }

    #[test]
    fn test_oversized_pool_warns() {
        let mut config = Config::default();
        config.session.pool_size = 100;
        let result = validate_config(&config);
        assert!(result.valid());
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_zero_timeouts_rejected() {
        let mut config = Config::default();
        config.runner.hard_timeout = std::time::Duration::ZERO;
        assert!(!validate_config(&config).valid());
    }
}
