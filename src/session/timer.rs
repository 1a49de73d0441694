//! Session countdown
//!
//! One-shot timer shared by every exercise in the session. Started lazily
//! on the first activation, ticked once per second for display, and
//! terminal once expired: there is no restart and no admin bypass for the
//! rest of the process lifetime.

use std::time::{Duration, Instant};

/// The shared session countdown.
#[derive(Debug, Clone)]
pub struct SessionTimer {
    duration: Duration,
    deadline: Option<Instant>,
    expired: bool,
}

impl SessionTimer {
    /// Create an unstarted countdown.
    pub fn new(duration: Duration) -> Self {
        SessionTimer {
            duration,
            deadline: None,
            expired: false,
        }
    }

    /// Whether the countdown has been started.
    pub fn started(&self) -> bool {
        self.deadline.is_some()
    }

    /// Start the countdown. No-op if already started.
    pub fn start(&mut self, now: Instant) {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.duration);
        }
    }

    /// Advance the timer. Returns `true` exactly once, on the expiry edge.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.expired {
            return false;
        }
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.expired = true;
                true
            }
            _ => false,
        }
    }

    /// Whether the countdown has expired. Latched.
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Time left, `None` before the first activation.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Display string for the countdown label.
    pub fn display(&self, now: Instant) -> String {
        if self.expired {
            return "time expired - editor is read-only".to_string();
        }
        match self.remaining(now) {
            None => "not started".to_string(),
            Some(left) => {
                let secs = left.as_secs();
                format!("time left: {:02}:{:02}", secs / 60, secs % 60)
            }
        }
    }
}
