//! Command registry.
//!
//! The `Registry` owns every registered [`CommandDescriptor`] and tracks how
//! often each command is dispatched. Registration may happen from several
//! independent sites, so the map sits behind a single readers-writer lock:
//! mutation takes the write side, dispatch/suggest/help the read side.
//! Readers clone the `Arc` they need and drop the guard before running any
//! command action.

use crate::command::{CommandDefinition, CommandDescriptor};
use crate::error::RegistrationError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Outcome of [`Registry::unregister`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unregistered {
    /// The command existed and was removed.
    Removed,
    /// No command had that name; nothing changed.
    NotFound,
}

struct Entry {
    descriptor: Arc<CommandDescriptor>,
    uses: AtomicU64,
}

#[derive(Default)]
struct Commands {
    /// Names in registration order.
    order: Vec<String>,
    entries: HashMap<String, Entry>,
}

/// Registry of console commands.
#[derive(Default)]
pub struct Registry {
    commands: RwLock<Commands>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under `name`.
    ///
    /// Fails without touching the registry if the name is unusable or
    /// taken, the definition has no action, or a declared parameter type
    /// is unsupported.
    pub fn register(
        &self,
        name: &str,
        definition: CommandDefinition,
    ) -> Result<(), RegistrationError> {
        let result = self.try_register(name, definition);
        if let Err(ref e) = result {
            warn!(command = %name, code = e.error_code(), error = %e, "Command registration failed");
        }
        result
    }

    fn try_register(
        &self,
        name: &str,
        definition: CommandDefinition,
    ) -> Result<(), RegistrationError> {
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(RegistrationError::InvalidCommandName(name.to_owned()));
        }

        let mut commands = self.commands.write();
        if commands.entries.contains_key(name) {
            return Err(RegistrationError::DuplicateCommand(name.to_owned()));
        }

        let descriptor = definition.resolve(name)?;
        debug!(
            command = %name,
            parameters = descriptor.parameters().len(),
            bare = descriptor.has_bare_action(),
            "Registered command"
        );

        commands.order.push(name.to_owned());
        commands.entries.insert(
            name.to_owned(),
            Entry {
                descriptor: Arc::new(descriptor),
                uses: AtomicU64::new(0),
            },
        );
        Ok(())
    }

    /// Remove the command registered under `name`, if any.
    pub fn unregister(&self, name: &str) -> Unregistered {
        let mut commands = self.commands.write();
        if commands.entries.remove(name).is_none() {
            warn!(command = %name, "Tried to remove a command that doesn't exist");
            return Unregistered::NotFound;
        }
        commands.order.retain(|n| n != name);
        debug!(command = %name, "Unregistered command");
        Unregistered::Removed
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<Arc<CommandDescriptor>> {
        self.commands
            .read()
            .entries
            .get(name)
            .map(|e| Arc::clone(&e.descriptor))
    }

    /// Check whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.read().entries.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.commands.read().order.clone()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.read().order.len()
    }

    /// Check if no command is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Descriptors in registration order.
    pub(crate) fn descriptors(&self) -> Vec<Arc<CommandDescriptor>> {
        let commands = self.commands.read();
        commands
            .order
            .iter()
            .filter_map(|name| commands.entries.get(name))
            .map(|e| Arc::clone(&e.descriptor))
            .collect()
    }

    /// Resolve `name` for dispatch, counting the use.
    pub(crate) fn resolve_for_dispatch(&self, name: &str) -> Option<Arc<CommandDescriptor>> {
        let commands = self.commands.read();
        let entry = commands.entries.get(name)?;
        entry.uses.fetch_add(1, Ordering::Relaxed);
        Some(Arc::clone(&entry.descriptor))
    }

    /// Command usage statistics: `(name, dispatch count)` for every command
    /// dispatched at least once, most used first.
    pub fn command_stats(&self) -> Vec<(String, u64)> {
        let commands = self.commands.read();
        let mut stats: Vec<_> = commands
            .entries
            .iter()
            .map(|(name, e)| (name.clone(), e.uses.load(Ordering::Relaxed)))
            .filter(|(_, count)| *count > 0)
            .collect();

        stats.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        stats
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("commands", &self.names())
            .finish()
    }
}
