//! Run requests and the events a live run emits

use std::time::Duration;
use uuid::Uuid;

/// Identifier of a single run.
pub type RunId = Uuid;

/// Request to execute the editor buffer.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// The source to execute (unwrapped; the guard is added by the runner)
    pub source: String,
    /// Standard input handed to the child: one write, then the channel closes
    pub stdin_data: Option<String>,
    /// Hard wall-clock timeout for this run
    pub hard_timeout: Duration,
}

impl RunRequest {
    /// Create a new run request with the given timeout.
    pub fn new(source: impl Into<String>, hard_timeout: Duration) -> Self {
        RunRequest {
            source: source.into(),
            stdin_data: None,
            hard_timeout,
        }
    }

    /// Set piped standard input.
    pub fn with_stdin(mut self, stdin: impl Into<String>) -> Self {
        self.stdin_data = Some(stdin.into());
        self
    }
}

/// Events delivered to the event loop while a run is live.
///
/// `Exited` is always the final event for a given run id.
#[derive(Debug, Clone)]
pub enum RunEvent {
    /// A chunk of standard output arrived
    Stdout { run: RunId, chunk: String },
    /// A chunk of standard error arrived
    Stderr { run: RunId, chunk: String },
    /// The child terminated (naturally, killed, or timed out)
    Exited {
        run: RunId,
        exit_code: Option<i32>,
        timed_out: bool,
    },
}

impl RunEvent {
    /// The run this event belongs to.
    pub fn run_id(&self) -> RunId {
        match self {
            RunEvent::Stdout { run, .. }
            | RunEvent::Stderr { run, .. }
            | RunEvent::Exited { run, .. } => *run,
        }
    }
}

/// Advisory result of a smoke run on a freshly loaded template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmokeReport {
    /// Ran to completion with no diagnostics
    Clean,
    /// Non-zero exit or diagnostics on stderr
    Fails,
    /// Still running at the smoke deadline (e.g. waiting for input)
    TimedOut,
    /// Did not pass the syntax check
    SyntaxIssue,
}

impl SmokeReport {
    /// The informational note surfaced in the output log.
    pub fn note(&self) -> &'static str {
        match self {
            SmokeReport::Clean => "Template pre-run completed (no immediate errors).",
            SmokeReport::Fails | SmokeReport::SyntaxIssue | SmokeReport::TimedOut => {
                "Template pre-run detected an issue (template loaded for fixing)."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = RunRequest::new("print(1)", Duration::from_secs(60)).with_stdin("5\n");
        assert_eq!(req.source, "print(1)");
        assert_eq!(req.stdin_data.as_deref(), Some("5\n"));
        assert_eq!(req.hard_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_event_run_id() {
        let id = Uuid::new_v4();
        let ev = RunEvent::Stdout {
            run: id,
            chunk: "x".into(),
        };
        assert_eq!(ev.run_id(), id);
    }
}
