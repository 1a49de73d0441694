//! Lockdown controller - the exam-lockdown state machine
//!
//! Owns window-chrome state and the global keyboard intercept, and decides
//! on every run outcome whether the user is released, re-locked, or moved
//! to the next exercise. All windowing calls go through the
//! [`WindowingPort`]; failures there are logged and swallowed, so a missing
//! protection layer degrades the lockdown instead of crashing it.

mod windowing;

pub use windowing::{HeadlessWindowing, RecordingWindowing, WindowingPort};

use tracing::warn;

use crate::config::LockdownConfig;
use crate::error::Result;
use crate::verdict::Outcome;

/// Lockdown phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No restrictions
    Unlocked,
    /// A run is live: chrome restricted, switching discouraged
    RunningGuarded,
    /// A run failed: window pinned until fixed, editor still writable
    ErrorLocked,
    /// Exercise in progress: full lockdown until override or next template
    ExamLocked,
}

/// Chrome and intercept state owned by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockdownState {
    /// Current phase
    pub phase: Phase,
    /// Whether focus loss triggers a re-focus request
    pub focus_guarded: bool,
    /// Whether the global key-block hook is installed
    pub keys_blocked: bool,
}

impl LockdownState {
    fn initial() -> Self {
        LockdownState {
            phase: Phase::Unlocked,
            focus_guarded: false,
            keys_blocked: false,
        }
    }
}

/// What the event loop must do after a run outcome has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunDisposition {
    /// Success with an active exercise: retire it, then call
    /// [`LockdownController::enter_exam_lock`]
    RetireAndRelock,
    /// Success with no active exercise: fully released
    Released,
    /// Failure: locked with a banner naming the failure class
    Faulted(Outcome),
    /// Success-looking completion without the controller's own run marker
    UnauthorizedCompletion,
}

/// Answer to a window-close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    Allow,
    /// Rejected outright; the caller shows a warning
    Deny,
}

/// The exam-lockdown state machine.
pub struct LockdownController {
    state: LockdownState,
    windowing: Box<dyn WindowingPort>,
    config: LockdownConfig,
}

impl LockdownController {
    /// Create a controller in the `Unlocked` phase.
    pub fn new(windowing: Box<dyn WindowingPort>, config: LockdownConfig) -> Self {
        LockdownController {
            state: LockdownState::initial(),
            windowing,
            config,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Current state snapshot.
    pub fn state(&self) -> LockdownState {
        self.state
    }

    /// A run is starting: restrict chrome and discourage task switching.
    pub fn on_run_started(&mut self) {
        best_effort("set_min_max_enabled", self.windowing.set_min_max_enabled(false));
        self.install_key_block();
        best_effort("maximize", self.windowing.maximize());
        self.state.focus_guarded = true;
        self.state.phase = Phase::RunningGuarded;
    }

    /// A run was refused before spawn (syntax rejection).
    pub fn on_run_refused(&mut self) {
        best_effort("set_min_max_enabled", self.windowing.set_min_max_enabled(false));
        self.error_lock();
    }

    /// Apply a classified run outcome.
    ///
    /// `exercise_active` is whether an exercise is currently active;
    /// `controller_initiated` is whether the completion carries the
    /// controller's own "I started this" marker.
    pub fn on_run_outcome(
        &mut self,
        outcome: Outcome,
        exercise_active: bool,
        controller_initiated: bool,
    ) -> RunDisposition {
        // Run protections come off after every completion; what replaces
        // them depends on the outcome.
        self.release_run_guard();

        if !outcome.is_success() {
            self.error_lock();
            return RunDisposition::Faulted(outcome);
        }

        if exercise_active && !controller_initiated {
            // Anti-bypass rule: a successful-looking completion that did
            // not originate here never retires the exercise.
            self.error_lock();
            return RunDisposition::UnauthorizedCompletion;
        }

        self.release_chrome();
        self.state.phase = Phase::Unlocked;

        if exercise_active {
            RunDisposition::RetireAndRelock
        } else {
            RunDisposition::Released
        }
    }

    /// A live run was deliberately stopped by the user.
    ///
    /// The attempt does not count either way: no retirement, but with an
    /// exercise active the window stays pinned until a real success.
    pub fn on_run_aborted(&mut self, exercise_active: bool) {
        self.release_run_guard();
        if exercise_active {
            self.error_lock();
        } else {
            self.release_chrome();
            self.state.phase = Phase::Unlocked;
        }
    }

    /// Apply the exam lock, fresh, independent of the prior phase.
    pub fn enter_exam_lock(&mut self) {
        best_effort("set_always_on_top", self.windowing.set_always_on_top(true));
        best_effort("set_min_max_enabled", self.windowing.set_min_max_enabled(false));
        if self.config.full_screen {
            best_effort("set_full_screen", self.windowing.set_full_screen(true));
        }
        self.install_key_block();
        self.state.focus_guarded = true;
        self.state.phase = Phase::ExamLocked;
    }

    /// Admin override: unconditionally release everything, from any phase.
    ///
    /// Idempotent; pressing it twice is harmless.
    pub fn admin_override(&mut self) {
        self.release_all();
    }

    /// Release every hook and chrome restriction and return to `Unlocked`.
    ///
    /// Also used when the buffer leaves exercise mode (new or opened file).
    pub fn release_all(&mut self) {
        self.release_run_guard();
        self.release_chrome();
        best_effort("set_full_screen", self.windowing.set_full_screen(false));
        best_effort("restore", self.windowing.restore());
        self.state = LockdownState::initial();
    }

    /// Focus-change notification from the frontend.
    pub fn on_focus_changed(&mut self, has_focus: bool) {
        if !has_focus && self.state.focus_guarded {
            best_effort("request_focus", self.windowing.request_focus());
        }
    }

    /// Whether a window-close request may proceed.
    pub fn on_close_requested(&self) -> CloseDecision {
        match self.state.phase {
            Phase::ExamLocked => CloseDecision::Deny,
            _ => CloseDecision::Allow,
        }
    }

    /// Pin the window for a failed run: close affordance back on, topmost,
    /// forced re-focus. Min/max stay disabled and the editor stays
    /// writable so the user can fix and re-run.
    fn error_lock(&mut self) {
        best_effort("set_close_enabled", self.windowing.set_close_enabled(true));
        best_effort("set_always_on_top", self.windowing.set_always_on_top(true));
        best_effort("request_focus", self.windowing.request_focus());
        self.state.phase = Phase::ErrorLocked;
    }

    /// Restore normal chrome.
    fn release_chrome(&mut self) {
        best_effort("set_min_max_enabled", self.windowing.set_min_max_enabled(true));
        best_effort("set_always_on_top", self.windowing.set_always_on_top(false));
        best_effort("set_close_enabled", self.windowing.set_close_enabled(true));
    }

    /// Install the global key block and toolkit grab, best effort.
    fn install_key_block(&mut self) {
        if !self.config.global_key_block {
            return;
        }
        match self.windowing.install_global_key_block() {
            Ok(()) => {
                self.state.keys_blocked = true;
                best_effort("grab_keyboard", self.windowing.grab_keyboard());
            }
            Err(e) => {
                // Lockdown proceeds without this protection layer
                warn!("global key block unavailable: {}", e);
            }
        }
    }

    /// Remove run-scoped protections.
    fn release_run_guard(&mut self) {
        if self.state.keys_blocked {
            best_effort(
                "remove_global_key_block",
                self.windowing.remove_global_key_block(),
            );
            self.state.keys_blocked = false;
        }
        best_effort("release_keyboard", self.windowing.release_keyboard());
        self.state.focus_guarded = false;
    }
}

/// Log-and-continue wrapper for port calls.
fn best_effort(what: &str, result: Result<()>) {
    if let Err(e) = result {
        warn!("windowing {} failed: {}", what, e);
    }
}
