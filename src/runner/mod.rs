//! Process runner - guarded execution of the editor buffer
//!
//! Launches a source snippet as a child process, streams its output, and
//! enforces a hard wall-clock timeout. Every launch is wrapped with a
//! parent-identity guard; every source is syntax-checked before a child is
//! ever spawned.

mod events;
mod guard;
mod process;
mod syntax;

pub use events::{RunEvent, RunId, RunRequest, SmokeReport};
pub use guard::{parent_token, wrap_source, GUARD_EXIT_CODE, PARENT_PID_ENV};
pub use process::{ActiveRun, ProcessRunner, RunStart};
pub use syntax::{PyCompileCheck, SyntaxCheck, SyntaxVerdict};

use crate::config::RunnerConfig;

/// Build the production runner from configuration.
pub fn create_runner(config: &RunnerConfig) -> ProcessRunner {
    let checker = PyCompileCheck::new(&config.interpreter, config.syntax_timeout);
    ProcessRunner::new(&config.interpreter, Box::new(checker))
}
