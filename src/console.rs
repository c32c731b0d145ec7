//! Console front-end.
//!
//! Takes submitted lines from the input side, runs them through the
//! registry and turns every outcome into printed lines. The engine reports
//! typed failures; the wording users see is decided here.

use crate::completion::SuggestionCycle;
use crate::config::ConsoleConfig;
use crate::output::Printer;
use crate::telemetry::CommandTimer;
use devconsole_core::builtin::register_help;
use devconsole_core::{
    DispatchError, DispatchWarning, PrintLevel, PrintSink, RegistrationError, Registry,
    Unregistered, tokenize,
};
use parking_lot::{Mutex, RwLock};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Upper bound for the history size setting.
pub const MAX_HISTORY: usize = 1000;

/// Runtime-adjustable console settings.
#[derive(Debug)]
pub struct Settings {
    prompt: RwLock<String>,
    echo_input: AtomicBool,
    quit: AtomicBool,
}

impl Settings {
    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self {
            prompt: RwLock::new(config.prompt.clone()),
            echo_input: AtomicBool::new(config.echo_input),
            quit: AtomicBool::new(false),
        }
    }

    pub fn prompt(&self) -> String {
        self.prompt.read().clone()
    }

    pub fn set_prompt(&self, prompt: impl Into<String>) {
        *self.prompt.write() = prompt.into();
    }

    pub fn echo_input(&self) -> bool {
        self.echo_input.load(Ordering::Relaxed)
    }

    pub fn set_echo_input(&self, enabled: bool) {
        self.echo_input.store(enabled, Ordering::Relaxed);
    }

    pub fn request_quit(&self) {
        self.quit.store(true, Ordering::Relaxed);
    }

    pub fn quit_requested(&self) -> bool {
        self.quit.load(Ordering::Relaxed)
    }
}

/// Bounded list of submitted lines, oldest first.
#[derive(Debug)]
pub struct InputHistory {
    entries: VecDeque<String>,
    capacity: usize,
}

impl InputHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_HISTORY);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: &str) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line.to_owned());
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, dropping the oldest entries that no longer fit.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.clamp(1, MAX_HISTORY);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Unregister `name`, printing a warning through `sink` if it was unknown.
pub fn remove_command(registry: &Registry, sink: &dyn PrintSink, name: &str) -> Unregistered {
    let outcome = registry.unregister(name);
    if outcome == Unregistered::NotFound {
        sink.print(
            &format!("Tried to remove command \"{name}\" from the console, but it doesn't exist!"),
            PrintLevel::Warning,
        );
    }
    outcome
}

/// An interactive console: a registry plus the presentation around it.
pub struct Console {
    registry: Arc<Registry>,
    printer: Arc<Printer>,
    settings: Arc<Settings>,
    history: Arc<Mutex<InputHistory>>,
    completion: Mutex<SuggestionCycle>,
}

impl Console {
    /// Create a console with `help` registered.
    pub fn new(config: &ConsoleConfig, printer: Arc<Printer>) -> Result<Self, RegistrationError> {
        let registry = Arc::new(Registry::new());
        register_help(&registry, printer.clone())?;

        Ok(Self {
            registry,
            printer,
            settings: Arc::new(Settings::from_config(config)),
            history: Arc::new(Mutex::new(InputHistory::new(config.history_size))),
            completion: Mutex::new(SuggestionCycle::new()),
        })
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn printer(&self) -> &Arc<Printer> {
        &self.printer
    }

    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    pub fn history(&self) -> &Arc<Mutex<InputHistory>> {
        &self.history
    }

    /// Print a line through the console.
    pub fn print(&self, text: &str, level: PrintLevel) {
        self.printer.print(text, level);
    }

    /// Handle one submitted line.
    pub fn submit(&self, line: &str) {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(&command) = tokenize(line).first() else {
            return;
        };

        self.history.lock().push(line);
        self.completion.lock().reset();
        if self.settings.echo_input() {
            self.print(&format!("> {line}"), PrintLevel::Normal);
        }

        let _timer = CommandTimer::new(command);
        match self.registry.dispatch(line) {
            Ok(done) => {
                for warning in &done.warnings {
                    self.render_warning(warning);
                }
            }
            Err(e) => self.render_error(&e),
        }
    }

    /// Next autocomplete suggestion for the text typed so far.
    ///
    /// Repeating the same text walks through the matches and wraps around.
    pub fn complete(&self, partial: &str) -> Option<String> {
        let mut completion = self.completion.lock();
        completion.update(partial, &self.registry);
        completion.advance().map(str::to_owned)
    }

    fn render_warning(&self, warning: &DispatchWarning) {
        match warning {
            DispatchWarning::ExtraArguments { .. } => self.print(
                "More arguments given than needed. Ignoring extra args.",
                PrintLevel::Warning,
            ),
        }
    }

    fn render_error(&self, error: &DispatchError) {
        for warning in error.warnings() {
            self.render_warning(warning);
        }

        match error {
            DispatchError::UnknownCommand(_) => {
                self.print("Command does not exist. Please try again.", PrintLevel::Error);
            }
            DispatchError::InsufficientArguments { .. } => {
                self.print("Insufficient amount of arguments specified.", PrintLevel::Error);
            }
            DispatchError::ArgumentTypeMismatch {
                parameter, mismatch, ..
            } => {
                self.print(
                    &format!("Type mismatch for argument '{parameter}': {mismatch}."),
                    PrintLevel::Error,
                );
            }
            DispatchError::ActionFailed {
                command, source, ..
            } => {
                self.print(&format!("Command '{command}' failed: {source}"), PrintLevel::Error);
            }
        }

        if let Some(usage) = error.usage() {
            self.print(&format!("Args: {usage}"), PrintLevel::Error);
        }
    }
}
