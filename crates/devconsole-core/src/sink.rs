//! Output interface for command actions.
//!
//! The engine itself never prints; actions that report something (the read
//! path of a setting, `help`) write through a [`PrintSink`] supplied by the
//! host.

use parking_lot::Mutex;

/// Severity of a printed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrintLevel {
    /// Plain output.
    #[default]
    Normal,
    /// Something failed.
    Error,
    /// Something was off but the operation went ahead.
    Warning,
    /// Something succeeded worth pointing out.
    Success,
}

impl PrintLevel {
    /// Lowercase label, for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Success => "success",
        }
    }
}

/// Presents a line of text to the user.
pub trait PrintSink: Send + Sync {
    /// Present `text` at the given level.
    fn print(&self, text: &str, level: PrintLevel);
}

/// Sink that keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<(PrintLevel, String)>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything printed so far.
    pub fn lines(&self) -> Vec<(PrintLevel, String)> {
        self.lines.lock().clone()
    }

    /// Printed text only, dropping levels.
    pub fn texts(&self) -> Vec<String> {
        self.lines.lock().iter().map(|(_, t)| t.clone()).collect()
    }

    /// Drain everything printed so far.
    pub fn take(&self) -> Vec<(PrintLevel, String)> {
        std::mem::take(&mut *self.lines.lock())
    }
}

impl PrintSink for MemorySink {
    fn print(&self, text: &str, level: PrintLevel) {
        self.lines.lock().push((level, text.to_owned()));
    }
}
