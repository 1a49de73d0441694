//! Guarded child-process execution
//!
//! Launches the editor buffer as a child of the shell, streams its output
//! back to the event loop, and enforces the hard wall-clock timeout. The
//! wrapped source lives in a temp file for exactly the duration of the run;
//! the file is removed on every exit path (natural exit, kill, timeout).

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::runner::events::{RunEvent, RunId, RunRequest, SmokeReport};
use crate::runner::guard;
use crate::runner::syntax::{SyntaxCheck, SyntaxVerdict};

/// Result of asking the runner to execute a buffer.
#[derive(Debug)]
pub enum RunStart {
    /// The source failed the pre-launch syntax check; no child was spawned.
    SyntaxRejected {
        /// Diagnostic from the checker, for the log only
        diagnostic: String,
    },
    /// A child process is live; events will arrive on the channel.
    Spawned(ActiveRun),
}

/// Handle to a live run.
///
/// Dropping the handle kills the child; [`ActiveRun::kill`] does so
/// explicitly. Either way the runner still delivers the final
/// [`RunEvent::Exited`] for this run id.
#[derive(Debug)]
pub struct ActiveRun {
    id: RunId,
    started_at: DateTime<Utc>,
    kill_tx: Option<oneshot::Sender<()>>,
}

impl ActiveRun {
    /// The run identifier carried by every event of this run.
    pub fn id(&self) -> RunId {
        self.id
    }

    /// When the child was spawned.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Kill the child immediately and unconditionally.
    pub fn kill(&mut self) {
        if let Some(tx) = self.kill_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Launches and supervises child processes for the shell.
pub struct ProcessRunner {
    interpreter: PathBuf,
    syntax: Box<dyn SyntaxCheck>,
    runs_spawned: AtomicU64,
}

impl ProcessRunner {
    /// Create a runner for the given interpreter.
    pub fn new(interpreter: impl Into<PathBuf>, syntax: Box<dyn SyntaxCheck>) -> Self {
        ProcessRunner {
            interpreter: interpreter.into(),
            syntax,
            runs_spawned: AtomicU64::new(0),
        }
    }

    /// How many user-program children have been spawned by [`execute`].
    ///
    /// Smoke runs are not counted.
    ///
    /// [`execute`]: ProcessRunner::execute
    pub fn runs_spawned(&self) -> u64 {
        self.runs_spawned.load(Ordering::Relaxed)
    }

    /// Execute a buffer: syntax-check, wrap with the runtime guard, spawn,
    /// and stream events to `events` until the final `Exited`.
    pub async fn execute(
        &self,
        request: RunRequest,
        events: mpsc::UnboundedSender<RunEvent>,
    ) -> Result<RunStart> {
        match self.syntax.check(&request.source).await? {
            SyntaxVerdict::Invalid { detail } => {
                return Ok(RunStart::SyntaxRejected { diagnostic: detail });
            }
            SyntaxVerdict::Valid => {}
        }

        let wrapped = guard::wrap_source(&request.source);
        let temp = write_temp_source(&wrapped, "examshell-run-")?;

        let mut child = Command::new(&self.interpreter)
            .arg("-u")
            .arg(temp.as_os_str())
            .env(guard::PARENT_PID_ENV, guard::parent_token())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::Runner(format!("failed to spawn interpreter: {}", e)))?;

        self.runs_spawned.fetch_add(1, Ordering::Relaxed);

        let id = RunId::new_v4();
        let started_at = Utc::now();
        let deadline = tokio::time::Instant::now() + request.hard_timeout;
        debug!("run {} spawned, deadline in {:?}", id, request.hard_timeout);

        // One write, then the input channel is closed
        let stdin_data = request.stdin_data;
        if let Some(mut stdin) = child.stdin.take() {
            tokio::spawn(async move {
                if let Some(data) = stdin_data {
                    if let Err(e) = stdin.write_all(data.as_bytes()).await {
                        debug!("stdin write failed: {}", e);
                    }
                }
                drop(stdin);
            });
        }

        let out_task = child
            .stdout
            .take()
            .map(|r| tokio::spawn(pump_stream(r, id, events.clone(), false)));
        let err_task = child
            .stderr
            .take()
            .map(|r| tokio::spawn(pump_stream(r, id, events.clone(), true)));

        let (kill_tx, mut kill_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let mut timed_out = false;
            let status = tokio::select! {
                res = child.wait() => res.ok(),
                _ = tokio::time::sleep_until(deadline) => {
                    warn!("run {} exceeded its hard timeout", id);
                    timed_out = true;
                    let _ = child.kill().await;
                    child.wait().await.ok()
                }
                _ = &mut kill_rx => {
                    debug!("run {} killed", id);
                    let _ = child.kill().await;
                    child.wait().await.ok()
                }
            };

            // Drain any output still buffered in the pipes
            if let Some(task) = out_task {
                let _ = task.await;
            }
            if let Some(task) = err_task {
                let _ = task.await;
            }

            // Temp source is deleted here on every exit path
            drop(temp);

            let exit_code = status.and_then(|s| s.code());
            let _ = events.send(RunEvent::Exited {
                run: id,
                exit_code,
                timed_out,
            });
        });

        Ok(RunStart::Spawned(ActiveRun {
            id,
            started_at,
            kill_tx: Some(kill_tx),
        }))
    }

    /// Short, non-interactive pre-run of a freshly loaded template.
    ///
    /// Advisory only: the report is surfaced as a note and never changes
    /// lockdown state. The template runs unguarded with a closed stdin and
    /// is killed at the smoke deadline, so it can never block on
    /// interactive input.
    pub async fn smoke_run(&self, source: &str, timeout: std::time::Duration) -> SmokeReport {
        match self.syntax.check(source).await {
            Ok(SyntaxVerdict::Invalid { .. }) => return SmokeReport::SyntaxIssue,
            Ok(SyntaxVerdict::Valid) => {}
            Err(e) => {
                warn!("smoke-run syntax check failed: {}", e);
                return SmokeReport::Fails;
            }
        }

        match self.smoke_run_inner(source, timeout).await {
            Ok(report) => report,
            Err(e) => {
                warn!("smoke run failed: {}", e);
                SmokeReport::Fails
            }
        }
    }

    async fn smoke_run_inner(
        &self,
        source: &str,
        timeout: std::time::Duration,
    ) -> Result<SmokeReport> {
        let temp = write_temp_source(source, "examshell-smoke-")?;

        let child = Command::new(&self.interpreter)
            .arg("-u")
            .arg(temp.as_os_str())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::Runner(format!("failed to spawn smoke run: {}", e)))?;

        let result = tokio::time::timeout(timeout, child.wait_with_output()).await;

        // Temp file removed before the verdict is interpreted
        drop(temp);

        match result {
            Ok(Ok(output)) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                if !output.status.success() || !stderr.trim().is_empty() {
                    Ok(SmokeReport::Fails)
                } else {
                    Ok(SmokeReport::Clean)
                }
            }
            Ok(Err(e)) => Err(Error::Runner(format!("smoke run error: {}", e))),
            // Child is killed on drop of the timed-out future
            Err(_) => Ok(SmokeReport::TimedOut),
        }
    }
}

/// Write source to a transient file with a recognizable extension.
fn write_temp_source(source: &str, prefix: &str) -> Result<tempfile::TempPath> {
    use std::io::Write;

    let mut file = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(".py")
        .tempfile()?;
    file.write_all(source.as_bytes())?;
    Ok(file.into_temp_path())
}

/// Forward one output stream to the event channel, chunk by chunk.
async fn pump_stream<R>(
    mut reader: R,
    id: RunId,
    events: mpsc::UnboundedSender<RunEvent>,
    is_stderr: bool,
) where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut buf = [0u8; 4096];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                let chunk = String::from_utf8_lossy(&buf[..n]).into_owned();
                let event = if is_stderr {
                    RunEvent::Stderr { run: id, chunk }
                } else {
                    RunEvent::Stdout { run: id, chunk }
                };
                if events.send(event).is_err() {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::guard::{GUARD_EXIT_CODE, PARENT_PID_ENV};
    use async_trait::async_trait;
    use std::time::Duration;

    struct AlwaysValid;

    #[async_trait]
    impl SyntaxCheck for AlwaysValid {
        async fn check(&self, _source: &str) -> Result<SyntaxVerdict> {
            Ok(SyntaxVerdict::Valid)
        }
    }

    struct AlwaysInvalid;

    #[async_trait]
    impl SyntaxCheck for AlwaysInvalid {
        async fn check(&self, _source: &str) -> Result<SyntaxVerdict> {
            Ok(SyntaxVerdict::Invalid {
                detail: "bad".into(),
            })
        }
    }

    fn python_available() -> bool {
        which::which("python3").is_ok()
    }

    async fn collect_run(
        runner: &ProcessRunner,
        request: RunRequest,
    ) -> (String, String, Option<i32>, bool) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let start = runner.execute(request, tx).await.unwrap();
        let _active = match start {
            RunStart::Spawned(active) => active,
            RunStart::SyntaxRejected { diagnostic } => {
                panic!("unexpected syntax rejection: {}", diagnostic)
            }
        };

        let mut stdout = String::new();
        let mut stderr = String::new();
        while let Some(event) = rx.recv().await {
            match event {
                RunEvent::Stdout { chunk, .. } => stdout.push_str(&chunk),
                RunEvent::Stderr { chunk, .. } => stderr.push_str(&chunk),
                RunEvent::Exited {
                    exit_code,
                    timed_out,
                    ..
                } => return (stdout, stderr, exit_code, timed_out),
            }
        }
        panic!("channel closed before Exited");
    }

    #[tokio::test]
    async fn test_syntax_rejection_spawns_nothing() {
        let runner = ProcessRunner::new("python3", Box::new(AlwaysInvalid));
        let (tx, _rx) = mpsc::unbounded_channel();
        let request = RunRequest::new("whatever", Duration::from_secs(5));
        match runner.execute(request, tx).await.unwrap() {
            RunStart::SyntaxRejected { diagnostic } => assert_eq!(diagnostic, "bad"),
            RunStart::Spawned(_) => panic!("spawned despite syntax rejection"),
        }
        assert_eq!(runner.runs_spawned(), 0);
    }

    #[tokio::test]
    async fn test_successful_run_streams_stdout() {
        if !python_available() {
            return;
        }
        let runner = ProcessRunner::new("python3", Box::new(AlwaysValid));
        let request = RunRequest::new("print('hello from child')", Duration::from_secs(30));
        let (stdout, stderr, exit_code, timed_out) = collect_run(&runner, request).await;
        assert!(stdout.contains("hello from child"));
        assert!(stderr.trim().is_empty());
        assert_eq!(exit_code, Some(0));
        assert!(!timed_out);
        assert_eq!(runner.runs_spawned(), 1);
    }

    #[tokio::test]
    async fn test_runtime_error_streams_stderr() {
        if !python_available() {
            return;
        }
        let runner = ProcessRunner::new("python3", Box::new(AlwaysValid));
        let request = RunRequest::new("print(1/0)", Duration::from_secs(30));
        let (_stdout, stderr, exit_code, timed_out) = collect_run(&runner, request).await;
        assert!(stderr.contains("ZeroDivisionError"));
        assert_ne!(exit_code, Some(0));
        assert!(!timed_out);
    }

    #[tokio::test]
    async fn test_hard_timeout_kills_child() {
        if !python_available() {
            return;
        }
        let runner = ProcessRunner::new("python3", Box::new(AlwaysValid));
        let request = RunRequest::new("while True: pass", Duration::from_millis(400));
        let (_stdout, _stderr, _exit, timed_out) = collect_run(&runner, request).await;
        assert!(timed_out);
    }

    #[tokio::test]
    async fn test_piped_stdin_single_write() {
        if !python_available() {
            return;
        }
        let runner = ProcessRunner::new("python3", Box::new(AlwaysValid));
        let request =
            RunRequest::new("print(input())", Duration::from_secs(30)).with_stdin("echoed\n");
        let (stdout, _stderr, exit_code, _timed_out) = collect_run(&runner, request).await;
        assert!(stdout.contains("echoed"));
        assert_eq!(exit_code, Some(0));
    }

    #[tokio::test]
    async fn test_kill_is_immediate() {
        if !python_available() {
            return;
        }
        let runner = ProcessRunner::new("python3", Box::new(AlwaysValid));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let request = RunRequest::new("while True: pass", Duration::from_secs(300));
        let mut active = match runner.execute(request, tx).await.unwrap() {
            RunStart::Spawned(active) => active,
            RunStart::SyntaxRejected { .. } => panic!("rejected"),
        };
        active.kill();

        loop {
            match rx.recv().await.expect("Exited must arrive") {
                RunEvent::Exited { timed_out, .. } => {
                    assert!(!timed_out);
                    break;
                }
                _ => continue,
            }
        }
    }

    #[tokio::test]
    async fn test_guard_rejects_foreign_parent() {
        if !python_available() {
            return;
        }
        // Launch the wrapped source directly with a token that cannot match
        // the child's parent pid, the way an outside launch would look.
        let wrapped = guard::wrap_source("print('should not get here')");
        let temp = write_temp_source(&wrapped, "examshell-test-").unwrap();
        let output = Command::new("python3")
            .arg("-u")
            .arg(temp.as_os_str())
            .env(PARENT_PID_ENV, "1")
            .stdin(Stdio::null())
            .output()
            .await
            .unwrap();
        assert_eq!(output.status.code(), Some(GUARD_EXIT_CODE));
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Unauthorized execution"));
        assert!(!stdout.contains("should not get here"));
    }

    #[tokio::test]
    async fn test_smoke_run_reports() {
        if !python_available() {
            return;
        }
        let runner = ProcessRunner::new("python3", Box::new(AlwaysValid));

        let clean = runner.smoke_run("print('ok')", Duration::from_secs(5)).await;
        assert_eq!(clean, SmokeReport::Clean);

        let fails = runner.smoke_run("print(1/0)", Duration::from_secs(5)).await;
        assert_eq!(fails, SmokeReport::Fails);

        // Templates that read stdin fail fast against the closed input
        // channel instead of stalling
        let reads_stdin = runner.smoke_run("input()", Duration::from_secs(5)).await;
        assert_eq!(reads_stdin, SmokeReport::Fails);

        let stalls = runner
            .smoke_run("import time\ntime.sleep(10)", Duration::from_millis(400))
            .await;
        assert_eq!(stalls, SmokeReport::TimedOut);
    }

    #[tokio::test]
    async fn test_smoke_run_syntax_issue() {
        let runner = ProcessRunner::new("python3", Box::new(AlwaysInvalid));
        let report = runner.smoke_run("anything", Duration::from_secs(1)).await;
        assert_eq!(report, SmokeReport::SyntaxIssue);
    }
}
