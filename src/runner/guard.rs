//! Parent-identity runtime guard
//!
//! Every run is wrapped with a preamble that aborts with a sentinel exit
//! code unless an environment-supplied token matches the child's actual
//! parent process id. This stops the temp script from being double-clicked
//! or launched outside the shell. It is a deterrent, not a security
//! boundary: the token is trivially spoofable by anyone who reads it.

/// Environment variable carrying the expected parent process id.
pub const PARENT_PID_ENV: &str = "EXAMSHELL_PARENT_PID";

/// Exit code the guard uses to signal an unauthorized launch.
pub const GUARD_EXIT_CODE: i32 = 2;

/// Preamble injected textually ahead of the user code on every run.
const GUARD_PREAMBLE: &str = r#"import os, sys
_expected_ppid = os.environ.get('EXAMSHELL_PARENT_PID')
try:
    if _expected_ppid is None or int(_expected_ppid) != os.getppid():
        print('Unauthorized execution: run this program from the exam shell')
        sys.exit(2)
except ValueError:
    print('Unauthorized execution: run this program from the exam shell')
    sys.exit(2)
sys.setrecursionlimit(10**7)
"#;

/// Wrap user source with the runtime guard.
pub fn wrap_source(source: &str) -> String {
    let mut wrapped = String::with_capacity(GUARD_PREAMBLE.len() + source.len() + 1);
    wrapped.push_str(GUARD_PREAMBLE);
    wrapped.push_str(source);
    if !source.ends_with('\n') {
        wrapped.push('\n');
    }
    wrapped
}

/// The token value the shell hands to its children: its own process id.
pub fn parent_token() -> String {
    std::process::id().to_string()
}
