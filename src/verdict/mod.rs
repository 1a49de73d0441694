//! Outcome classifier - pure verdict derivation for a finished run
//!
//! The classifier is a pure function over the evidence a run leaves behind.
//! It never looks at live process state, so the same evidence always yields
//! the same outcome.

use crate::runner::GUARD_EXIT_CODE;

/// Everything a finished (or refused) run leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunEvidence {
    /// Whether the source passed the pre-launch syntax check
    pub syntax_ok: bool,
    /// Child exit code, `None` when killed by signal or never spawned
    pub exit_code: Option<i32>,
    /// Whether any non-whitespace stderr content was observed
    pub stderr_nonempty: bool,
    /// Whether the hard wall-clock timeout fired
    pub timed_out: bool,
    /// Whether any non-whitespace stdout content was observed
    pub produced_stdout: bool,
}

impl RunEvidence {
    /// Evidence for a run refused before spawn.
    pub fn syntax_rejected() -> Self {
        RunEvidence {
            syntax_ok: false,
            exit_code: None,
            stderr_nonempty: false,
            timed_out: false,
            produced_stdout: false,
        }
    }
}

/// Classification of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Clean exit, no diagnostics, no stdout observed
    Ok,
    /// Clean exit, no diagnostics, at least one non-whitespace stdout chunk
    OkWithOutput,
    /// Rejected before spawn
    SyntaxError,
    /// Diagnostics on stderr or an unclean exit
    RuntimeError,
    /// Killed at the hard wall-clock deadline
    Timeout,
    /// The guard sentinel: launched without the shell's parent token
    Unauthorized,
}

impl Outcome {
    /// Whether this run counts as a success.
    ///
    /// Both success outcomes retire an active exercise; the distinction
    /// only changes the message shown.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Ok | Outcome::OkWithOutput)
    }

    /// Short failure-class label used in banners.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::OkWithOutput => "ok (output produced)",
            Outcome::SyntaxError => "syntax error",
            Outcome::RuntimeError => "runtime error",
            Outcome::Timeout => "time limit exceeded",
            Outcome::Unauthorized => "unauthorized execution",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a run from its evidence.
pub fn classify(evidence: &RunEvidence) -> Outcome {
    if !evidence.syntax_ok {
        return Outcome::SyntaxError;
    }
    if evidence.timed_out {
        return Outcome::Timeout;
    }
    if evidence.exit_code == Some(GUARD_EXIT_CODE) {
        return Outcome::Unauthorized;
    }
    if evidence.stderr_nonempty {
        return Outcome::RuntimeError;
    }
    match evidence.exit_code {
        Some(0) => {
            if evidence.produced_stdout {
                Outcome::OkWithOutput
            } else {
                Outcome::Ok
            }
        }
        // Non-zero exit, or killed before reporting a code
        _ => Outcome::RuntimeError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_exit() -> RunEvidence {
        RunEvidence {
            syntax_ok: true,
            exit_code: Some(0),
            stderr_nonempty: false,
            timed_out: false,
            produced_stdout: false,
        }
    }

    #[test]
    fn test_ok_paths() {
        assert_eq!(classify(&clean_exit()), Outcome::Ok);

        let with_output = RunEvidence {
            produced_stdout: true,
            ..clean_exit()
        };
        assert_eq!(classify(&with_output), Outcome::OkWithOutput);
    }

    #[test]
    fn test_syntax_error_wins() {
        // Syntax rejection short-circuits everything else
        let evidence = RunEvidence::syntax_rejected();
        assert_eq!(classify(&evidence), Outcome::SyntaxError);
    }

    #[test]
    fn test_timeout_beats_exit_code() {
        let evidence = RunEvidence {
            timed_out: true,
            exit_code: None,
            ..clean_exit()
        };
        assert_eq!(classify(&evidence), Outcome::Timeout);
    }

    #[test]
    fn test_guard_sentinel_is_unauthorized() {
        let evidence = RunEvidence {
            exit_code: Some(GUARD_EXIT_CODE),
            // The guard prints its refusal to stdout
            produced_stdout: true,
            ..clean_exit()
        };
        assert_eq!(classify(&evidence), Outcome::Unauthorized);
    }

    #[test]
    fn test_stderr_means_runtime_error() {
        let evidence = RunEvidence {
            stderr_nonempty: true,
            // Even with a clean exit code
            exit_code: Some(0),
            ..clean_exit()
        };
        assert_eq!(classify(&evidence), Outcome::RuntimeError);
    }

    #[test]
    fn test_nonzero_exit_is_runtime_error() {
        let evidence = RunEvidence {
            exit_code: Some(1),
            ..clean_exit()
        };
        assert_eq!(classify(&evidence), Outcome::RuntimeError);

        let killed = RunEvidence {
            exit_code: None,
            ..clean_exit()
        };
        assert_eq!(classify(&killed), Outcome::RuntimeError);
    }

    #[test]
    fn test_success_predicate() {
        assert!(Outcome::Ok.is_success());
        assert!(Outcome::OkWithOutput.is_success());
        assert!(!Outcome::Unauthorized.is_success());
        assert!(!Outcome::Timeout.is_success());
    }
}
