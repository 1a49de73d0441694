//! Error types for examshell

use thiserror::Error;

/// Result type alias using examshell's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for examshell
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Process runner error (spawn, stream, or kill failure)
    #[error("Runner error: {0}")]
    Runner(String),

    /// Windowing port error (chrome flags, hooks, focus)
    #[error("Windowing error: {0}")]
    Windowing(String),

    /// Session error (pool membership, expired countdown)
    #[error("Session error: {0}")]
    Session(String),

    /// Exercise catalog error
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment error: {0}")]
    Env(#[from] std::env::VarError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Check if error is a client error (user's fault)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput(_) | Error::NotFound(_) | Error::Session(_)
        )
    }

    /// Check if error is a best-effort port failure that the controller
    /// swallows rather than propagating.
    pub fn is_best_effort(&self) -> bool {
        matches!(self, Error::Windowing(_))
    }
}
