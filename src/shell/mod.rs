//! Editor shell - the collaborator surface the lockdown machinery drives
//!
//! Owns the text buffer, the bounded output log, the persistent banner, and
//! the file-backing state. Deliberately free of lockdown logic: the event
//! loop decides what is allowed, the shell just holds state and does file
//! mechanics.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Bounded, append-only output log.
///
/// When the log outgrows its byte limit the oldest content is dropped.
#[derive(Debug)]
pub struct OutputLog {
    text: String,
    max_bytes: usize,
}

impl OutputLog {
    /// Create a log with the given byte limit.
    pub fn new(max_bytes: usize) -> Self {
        OutputLog {
            text: String::new(),
            max_bytes,
        }
    }

    /// Append a raw chunk, exactly as received.
    pub fn append(&mut self, chunk: &str) {
        self.text.push_str(chunk);
        self.trim_front();
    }

    /// Append a status note on its own line.
    pub fn note(&mut self, line: &str) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
        self.text.push_str(line);
        self.text.push('\n');
        self.trim_front();
    }

    /// Entire retained log.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    fn trim_front(&mut self) {
        if self.text.len() <= self.max_bytes {
            return;
        }
        let cut = self.text.len() - self.max_bytes;
        // Keep the cut on a char boundary
        let cut = (cut..self.text.len())
            .find(|i| self.text.is_char_boundary(*i))
            .unwrap_or(self.text.len());
        self.text.drain(..cut);
    }
}

/// The editor surface state.
pub struct EditorShell {
    buffer: String,
    read_only: bool,
    current_file: Option<PathBuf>,
    banner: Option<String>,
    output: OutputLog,
    quick_panel_visible: bool,
}

impl EditorShell {
    /// Create an empty shell.
    pub fn new(max_output_bytes: usize) -> Self {
        EditorShell {
            buffer: String::new(),
            read_only: false,
            current_file: None,
            banner: None,
            output: OutputLog::new(max_output_bytes),
            quick_panel_visible: true,
        }
    }

    /// Current buffer contents.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Replace the buffer contents.
    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    /// Whether there is any non-whitespace content to lose.
    pub fn has_content(&self) -> bool {
        !self.buffer.trim().is_empty()
    }

    /// Whether the buffer reads from stdin and a run should gather input.
    pub fn needs_input(&self) -> bool {
        self.buffer.contains("input(")
    }

    /// Permanently or temporarily freeze the editor.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Whether the editor is frozen.
    pub fn read_only(&self) -> bool {
        self.read_only
    }

    /// The persistent banner, if shown.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Show the persistent banner.
    pub fn set_banner(&mut self, text: impl Into<String>) {
        self.banner = Some(text.into());
    }

    /// Hide the banner.
    pub fn clear_banner(&mut self) {
        self.banner = None;
    }

    /// The output log.
    pub fn output(&self) -> &OutputLog {
        &self.output
    }

    /// Mutable output log for the event loop.
    pub fn output_mut(&mut self) -> &mut OutputLog {
        &mut self.output
    }

    /// Whether the quick-access exercise panel is shown.
    pub fn quick_panel_visible(&self) -> bool {
        self.quick_panel_visible
    }

    /// Hide the quick-access panel (pool exhausted).
    pub fn hide_quick_panel(&mut self) {
        self.quick_panel_visible = false;
    }

    /// File currently backing the buffer, if any.
    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    /// Window title for the frontend.
    pub fn title(&self) -> String {
        match &self.current_file {
            Some(path) => match path.file_name() {
                Some(name) => format!("Examshell - {}", name.to_string_lossy()),
                None => "Examshell".to_string(),
            },
            None => "Examshell".to_string(),
        }
    }

    /// Reset to an empty, file-less buffer.
    pub fn new_file(&mut self) {
        self.buffer.clear();
        self.current_file = None;
        self.banner = None;
        self.output.clear();
    }

    /// Replace the buffer with a file's contents.
    pub fn open_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path)?;
        self.buffer = content;
        self.current_file = Some(path.to_path_buf());
        self.banner = None;
        self.output.clear();
        Ok(())
    }

    /// Write the buffer to its backing file, or to `path` when given.
    ///
    /// Fails with `InvalidInput` when neither exists.
    pub fn save_file(&mut self, path: Option<&Path>) -> Result<PathBuf> {
        let target = match path {
            Some(p) => p.to_path_buf(),
            None => self
                .current_file
                .clone()
                .ok_or_else(|| crate::Error::InvalidInput("no file to save to".to_string()))?,
        };
        std::fs::write(&target, &self.buffer)?;
        self.current_file = Some(target.clone());
        Ok(target)
    }
}
