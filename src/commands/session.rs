//! Session commands: `clear`, `con_remove`, `stats`, `quit`.

use crate::console::{self, Console};
use crate::output::TerminalSink;
use devconsole_core::{ArgumentKind, CommandDefinition, PrintLevel, PrintSink, RegistrationError};
use std::sync::Arc;

pub fn register(console: &Console, terminal: &Arc<TerminalSink>) -> Result<(), RegistrationError> {
    let registry = console.registry();

    let screen = terminal.clone();
    registry.register(
        "clear",
        CommandDefinition::builder()
            .description("Clear the console's log.")
            .action(move |_| {
                screen.clear();
                Ok(())
            })
            .build(),
    )?;

    let owner = Arc::downgrade(registry);
    let out: Arc<dyn PrintSink> = console.printer().clone();
    registry.register(
        "con_remove",
        CommandDefinition::builder()
            .description("Remove a command from the console.")
            .param("command", ArgumentKind::String)
            .action(move |args| {
                if let Some(registry) = owner.upgrade() {
                    console::remove_command(&registry, out.as_ref(), args.string(0)?);
                }
                Ok(())
            })
            .build(),
    )?;

    let counted = Arc::downgrade(registry);
    let out: Arc<dyn PrintSink> = console.printer().clone();
    registry.register(
        "stats",
        CommandDefinition::builder()
            .description("Show how often each command has been used this session.")
            .action(move |_| {
                let Some(registry) = counted.upgrade() else {
                    return Ok(());
                };
                for (name, count) in registry.command_stats() {
                    out.print(&format!("{name:<16} {count}"), PrintLevel::Normal);
                }
                Ok(())
            })
            .build(),
    )?;

    let settings = console.settings().clone();
    registry.register(
        "quit",
        CommandDefinition::builder()
            .description("Close the console.")
            .action(move |_| {
                settings.request_quit();
                Ok(())
            })
            .build(),
    )?;

    Ok(())
}
