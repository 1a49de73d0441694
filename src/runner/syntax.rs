//! Pre-launch syntax check
//!
//! A run whose source fails the syntax check never spawns the user program.
//! The production checker shells out to `interpreter -m py_compile`; tests
//! substitute a canned checker through the trait.

use async_trait::async_trait;
use std::io::Write;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result};

/// Verdict of a syntax check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxVerdict {
    /// The source parses
    Valid,
    /// The source does not parse
    Invalid {
        /// Trimmed diagnostic, kept out of the student-facing banner
        detail: String,
    },
}

impl SyntaxVerdict {
    /// Whether the source parsed.
    pub fn is_valid(&self) -> bool {
        matches!(self, SyntaxVerdict::Valid)
    }
}

/// Syntax-check seam in front of the process runner.
#[async_trait]
pub trait SyntaxCheck: Send + Sync {
    /// Check source without executing it.
    async fn check(&self, source: &str) -> Result<SyntaxVerdict>;
}

/// Checker shelling out to `interpreter -m py_compile`.
pub struct PyCompileCheck {
    interpreter: PathBuf,
    timeout: Duration,
}

impl PyCompileCheck {
    /// Create a checker for the given interpreter.
    pub fn new(interpreter: impl Into<PathBuf>, timeout: Duration) -> Self {
        PyCompileCheck {
            interpreter: interpreter.into(),
            timeout,
        }
    }
}

#[async_trait]
impl SyntaxCheck for PyCompileCheck {
    async fn check(&self, source: &str) -> Result<SyntaxVerdict> {
        let mut file = tempfile::Builder::new()
            .prefix("examshell-check-")
            .suffix(".py")
            .tempfile()?;
        file.write_all(source.as_bytes())?;
        let path = file.into_temp_path();

        let child = Command::new(&self.interpreter)
            .arg("-m")
            .arg("py_compile")
            .arg(path.as_os_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::Runner(format!("failed to spawn syntax check: {}", e)))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| Error::Runner("syntax check timed out".to_string()))?
            .map_err(|e| Error::Runner(format!("syntax check failed: {}", e)))?;

        // Temp file is removed here regardless of the verdict
        drop(path);

        if output.status.success() {
            Ok(SyntaxVerdict::Valid)
        } else {
            let detail = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!("syntax check rejected source: {}", detail);
            Ok(SyntaxVerdict::Invalid { detail })
        }
    }
}
