//! Commands every console carries.

use crate::command::CommandDefinition;
use crate::error::RegistrationError;
use crate::kind::ArgumentKind;
use crate::registry::Registry;
use crate::sink::{PrintLevel, PrintSink};
use std::sync::Arc;

/// Name of the help command.
pub const HELP: &str = "help";

const HELP_DESCRIPTION: &str =
    "List all commands and their descriptions, or specify a command and get its arguments as well.";

/// Register `help` on `registry`, printing through `sink`.
///
/// `help <command>` prints the command's description and arguments; plain
/// `help` lists every command with its description. The command only holds
/// a weak reference to the registry that owns it.
pub fn register_help(
    registry: &Arc<Registry>,
    sink: Arc<dyn PrintSink>,
) -> Result<(), RegistrationError> {
    let describe_registry = Arc::downgrade(registry);
    let describe_sink = Arc::clone(&sink);
    let list_registry = Arc::downgrade(registry);
    let list_sink = sink;

    registry.register(
        HELP,
        CommandDefinition::builder()
            .description(HELP_DESCRIPTION)
            .param("command", ArgumentKind::String)
            .action(move |args| {
                let Some(registry) = describe_registry.upgrade() else {
                    return Ok(());
                };
                let text = registry.describe(args.string(0)?)?;
                for line in text.lines() {
                    describe_sink.print(line, PrintLevel::Normal);
                }
                Ok(())
            })
            .bare_action(move || {
                let Some(registry) = list_registry.upgrade() else {
                    return Ok(());
                };
                for (name, description) in registry.describe_all() {
                    list_sink.print(&format!("{name}: {description}"), PrintLevel::Normal);
                }
                Ok(())
            })
            .build(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    fn console() -> (Arc<Registry>, Arc<MemorySink>) {
        let registry = Arc::new(Registry::new());
        let sink = Arc::new(MemorySink::new());
        register_help(&registry, sink.clone()).unwrap();
        (registry, sink)
    }

    #[test]
    fn test_help_alone_lists_itself() {
        let (registry, sink) = console();
        registry.dispatch("help").unwrap();
        assert_eq!(sink.texts(), vec![format!("help: {HELP_DESCRIPTION}")]);
    }

    #[test]
    fn test_help_for_command() {
        let (registry, sink) = console();
        registry.dispatch("help help").unwrap();
        assert_eq!(
            sink.texts(),
            vec![HELP_DESCRIPTION.to_string(), "Args: command(String)".to_string()]
        );
    }

    #[test]
    fn test_help_for_unknown_command_fails() {
        let (registry, sink) = console();
        let err = registry.dispatch("help ghost").unwrap_err();
        assert_eq!(err.error_code(), "action_failed");
        assert_eq!(err.to_string(), "help: unknown command: ghost");
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_help_does_not_keep_registry_alive() {
        let (registry, _sink) = console();
        let weak = Arc::downgrade(&registry);
        drop(registry);
        assert!(weak.upgrade().is_none());
    }
}
