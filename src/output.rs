//! Console output: deferred printing, readiness and the terminal sink.
//!
//! Commands can print before the presentation layer exists (start-up
//! banners, registration warnings). The [`Printer`] queues those lines and
//! flushes them, in order, once a sink is attached; attaching also fires the
//! one-shot [`ReadySignal`].

use devconsole_core::{PrintLevel, PrintSink};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Output errors.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("a console is already attached")]
    AlreadyAttached,
}

/// One-shot readiness flag.
///
/// Starts unset; [`set`](Self::set) flips it once and wakes every waiter.
#[derive(Debug)]
pub struct ReadySignal {
    tx: watch::Sender<bool>,
}

impl ReadySignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Mark ready. Later calls are no-ops.
    pub fn set(&self) {
        self.tx.send_if_modified(|ready| !std::mem::replace(ready, true));
    }

    pub fn is_ready(&self) -> bool {
        *self.tx.borrow()
    }

    /// Wait until the flag is set; returns immediately if it already is.
    pub async fn wait(&self) {
        if self.is_ready() {
            return;
        }
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = rx.wait_for(|ready| *ready).await;
    }
}

impl Default for ReadySignal {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct PrinterState {
    sink: Option<Arc<dyn PrintSink>>,
    pending: Vec<(PrintLevel, String)>,
}

/// The console's print sink.
///
/// Every line is mirrored to the log at debug level.
#[derive(Default)]
pub struct Printer {
    state: Mutex<PrinterState>,
    ready: ReadySignal,
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the presentation sink, flush queued lines into it and fire the
    /// readiness signal. Only one sink may ever be attached.
    pub fn attach(&self, sink: Arc<dyn PrintSink>) -> Result<(), OutputError> {
        let mut state = self.state.lock();
        if state.sink.is_some() {
            return Err(OutputError::AlreadyAttached);
        }

        let pending = std::mem::take(&mut state.pending);
        debug!(flushed = pending.len(), "Console attached");
        for (level, text) in &pending {
            sink.print(text, *level);
        }
        state.sink = Some(sink);
        drop(state);

        self.ready.set();
        Ok(())
    }

    pub fn ready(&self) -> &ReadySignal {
        &self.ready
    }

    /// Number of lines waiting for a sink.
    pub fn pending(&self) -> usize {
        self.state.lock().pending.len()
    }
}

impl PrintSink for Printer {
    fn print(&self, text: &str, level: PrintLevel) {
        debug!(target: "devconsole::console", level = level.as_str(), "{text}");

        // Printing under the lock keeps lines ordered across the attach flush.
        let mut state = self.state.lock();
        match &state.sink {
            Some(sink) => sink.print(text, level),
            None => state.pending.push((level, text.to_owned())),
        }
    }
}

const RESET: &str = "\x1b[0m";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

fn level_color(level: PrintLevel) -> Option<&'static str> {
    match level {
        PrintLevel::Normal => None,
        PrintLevel::Error => Some("\x1b[91m"),
        PrintLevel::Warning => Some("\x1b[93m"),
        PrintLevel::Success => Some("\x1b[92m"),
    }
}

/// Writes console lines to a terminal, coloured by level.
pub struct TerminalSink {
    out: Mutex<Box<dyn Write + Send>>,
    color: AtomicBool,
}

impl TerminalSink {
    /// Sink on standard output.
    pub fn stdout(color: bool) -> Self {
        Self::with_writer(Box::new(io::stdout()), color)
    }

    pub fn with_writer(out: Box<dyn Write + Send>, color: bool) -> Self {
        Self {
            out: Mutex::new(out),
            color: AtomicBool::new(color),
        }
    }

    pub fn color(&self) -> bool {
        self.color.load(Ordering::Relaxed)
    }

    pub fn set_color(&self, enabled: bool) {
        self.color.store(enabled, Ordering::Relaxed);
    }

    /// Clear the screen.
    pub fn clear(&self) {
        self.write_raw(CLEAR_SCREEN);
    }

    fn write_raw(&self, text: &str) {
        let mut out = self.out.lock();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            warn!(error = %e, "Failed to write console output");
        }
    }
}

impl PrintSink for TerminalSink {
    fn print(&self, text: &str, level: PrintLevel) {
        let line = match level_color(level) {
            Some(code) if self.color() => format!("{code}{text}{RESET}\n"),
            _ => format!("{text}\n"),
        };
        self.write_raw(&line);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use devconsole_core::MemorySink;

    /// Shared in-memory writer for inspecting terminal output.
    #[derive(Clone, Default)]
    pub(crate) struct Captured(pub Arc<Mutex<Vec<u8>>>);

    impl Captured {
        pub(crate) fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn printer_defers_until_attached() {
        let printer = Printer::new();
        printer.print("early", PrintLevel::Warning);
        printer.print("earlier still queued", PrintLevel::Normal);
        assert_eq!(printer.pending(), 2);
        assert!(!printer.ready().is_ready());

        let sink = Arc::new(MemorySink::new());
        printer.attach(sink.clone()).unwrap();
        printer.print("late", PrintLevel::Success);

        assert!(printer.ready().is_ready());
        assert_eq!(printer.pending(), 0);
        assert_eq!(sink.texts(), ["early", "earlier still queued", "late"]);
        assert_eq!(sink.lines()[0].0, PrintLevel::Warning);
    }

    #[test]
    fn printer_refuses_second_sink() {
        let printer = Printer::new();
        printer.attach(Arc::new(MemorySink::new())).unwrap();
        assert!(matches!(
            printer.attach(Arc::new(MemorySink::new())),
            Err(OutputError::AlreadyAttached)
        ));
    }

    #[tokio::test]
    async fn ready_signal_wakes_waiters() {
        let printer = Arc::new(Printer::new());
        let waiter = {
            let printer = Arc::clone(&printer);
            tokio::spawn(async move { printer.ready().wait().await })
        };

        printer.attach(Arc::new(MemorySink::new())).unwrap();
        waiter.await.unwrap();

        // Already set: returns at once.
        printer.ready().wait().await;
    }

    #[test]
    fn ready_signal_is_one_shot() {
        let signal = ReadySignal::new();
        signal.set();
        signal.set();
        assert!(signal.is_ready());
    }

    #[test]
    fn terminal_colours_by_level() {
        let captured = Captured::default();
        let sink = TerminalSink::with_writer(Box::new(captured.clone()), true);

        sink.print("plain", PrintLevel::Normal);
        sink.print("bad", PrintLevel::Error);
        assert_eq!(captured.text(), "plain\n\x1b[91mbad\x1b[0m\n");
    }

    #[test]
    fn terminal_without_colour() {
        let captured = Captured::default();
        let sink = TerminalSink::with_writer(Box::new(captured.clone()), true);
        sink.set_color(false);

        sink.print("careful", PrintLevel::Warning);
        assert_eq!(captured.text(), "careful\n");
        assert!(!sink.color());
    }
}
