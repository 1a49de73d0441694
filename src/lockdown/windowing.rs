//! Windowing port - the capability seam in front of the OS
//!
//! The controller never touches OS APIs directly; it only calls this port.
//! Platform frontends implement it with real window-chrome flags and
//! keyboard hooks. Every method is best effort: the controller logs and
//! continues on failure rather than propagating.

use std::sync::{Arc, Mutex};

use crate::error::Result;

/// Window-chrome and keyboard-intercept capabilities.
pub trait WindowingPort: Send {
    /// Pin or unpin the window above all others.
    fn set_always_on_top(&mut self, on: bool) -> Result<()>;
    /// Enable or disable the minimize/maximize affordances.
    fn set_min_max_enabled(&mut self, enabled: bool) -> Result<()>;
    /// Enable or disable the close affordance.
    fn set_close_enabled(&mut self, enabled: bool) -> Result<()>;
    /// Enter or leave full-screen.
    fn set_full_screen(&mut self, on: bool) -> Result<()>;
    /// Maximize the window.
    fn maximize(&mut self) -> Result<()>;
    /// Leave any forced-maximized or full-screen state.
    fn restore(&mut self) -> Result<()>;
    /// Ask the OS to bring the window back to the foreground.
    fn request_focus(&mut self) -> Result<()>;
    /// Grab keyboard input at the toolkit level.
    fn grab_keyboard(&mut self) -> Result<()>;
    /// Release a keyboard grab.
    fn release_keyboard(&mut self) -> Result<()>;
    /// Install the low-level hook that blocks task-switch keys.
    fn install_global_key_block(&mut self) -> Result<()>;
    /// Remove the low-level key-block hook.
    fn remove_global_key_block(&mut self) -> Result<()>;
}

/// Headless port for terminal frontends: every call succeeds and is only
/// visible in the logs.
#[derive(Debug, Default)]
pub struct HeadlessWindowing;

macro_rules! headless_ok {
    ($($name:ident($($arg:ident: $ty:ty),*)),* $(,)?) => {
        $(
            fn $name(&mut self, $($arg: $ty),*) -> Result<()> {
                let args: Vec<String> = vec![$(format!("{:?}", $arg)),*];
                tracing::debug!("windowing: {}({})", stringify!($name), args.join(", "));
                Ok(())
            }
        )*
    };
}

impl WindowingPort for HeadlessWindowing {
    headless_ok!(
        set_always_on_top(on: bool),
        set_min_max_enabled(enabled: bool),
        set_close_enabled(enabled: bool),
        set_full_screen(on: bool),
        maximize(),
        restore(),
        request_focus(),
        grab_keyboard(),
        release_keyboard(),
        install_global_key_block(),
        remove_global_key_block(),
    );
}

/// Port that records every call, for tests and dry runs.
///
/// Clone it before handing it to the controller; all clones share the same
/// call log.
#[derive(Debug, Clone, Default)]
pub struct RecordingWindowing {
    calls: Arc<Mutex<Vec<String>>>,
    hooks_fail: bool,
}

impl RecordingWindowing {
    /// A recording port where every call succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// A recording port whose keyboard-hook calls fail, for exercising the
    /// best-effort path.
    pub fn with_failing_hooks() -> Self {
        RecordingWindowing {
            calls: Arc::new(Mutex::new(Vec::new())),
            hooks_fail: true,
        }
    }

    /// Snapshot of the calls recorded so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Whether a call was recorded.
    pub fn saw(&self, call: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|c| c == call)
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl WindowingPort for RecordingWindowing {
    fn set_always_on_top(&mut self, on: bool) -> Result<()> {
        self.record(format!("set_always_on_top({})", on));
        Ok(())
    }

    fn set_min_max_enabled(&mut self, enabled: bool) -> Result<()> {
        self.record(format!("set_min_max_enabled({})", enabled));
        Ok(())
    }

    fn set_close_enabled(&mut self, enabled: bool) -> Result<()> {
        self.record(format!("set_close_enabled({})", enabled));
        Ok(())
    }

    fn set_full_screen(&mut self, on: bool) -> Result<()> {
        self.record(format!("set_full_screen({})", on));
        Ok(())
    }

    fn maximize(&mut self) -> Result<()> {
        self.record("maximize".to_string());
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        self.record("restore".to_string());
        Ok(())
    }

    fn request_focus(&mut self) -> Result<()> {
        self.record("request_focus".to_string());
        Ok(())
    }

    fn grab_keyboard(&mut self) -> Result<()> {
        self.record("grab_keyboard".to_string());
        if self.hooks_fail {
            return Err(crate::Error::Windowing("grab refused".to_string()));
        }
        Ok(())
    }

    fn release_keyboard(&mut self) -> Result<()> {
        self.record("release_keyboard".to_string());
        Ok(())
    }

    fn install_global_key_block(&mut self) -> Result<()> {
        self.record("install_global_key_block".to_string());
        if self.hooks_fail {
            return Err(crate::Error::Windowing("hook refused".to_string()));
        }
        Ok(())
    }

    fn remove_global_key_block(&mut self) -> Result<()> {
        self.record("remove_global_key_block".to_string());
        Ok(())
    }
}
