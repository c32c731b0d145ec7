//! `con_*` setting commands.

use crate::console::{Console, MAX_HISTORY};
use crate::output::TerminalSink;
use devconsole_core::{ArgumentKind, CommandDefinition, PrintLevel, PrintSink, RegistrationError};
use std::sync::Arc;

pub fn register(console: &Console, terminal: &Arc<TerminalSink>) -> Result<(), RegistrationError> {
    let registry = console.registry();
    let printer: Arc<dyn PrintSink> = console.printer().clone();

    let (set, get) = (console.settings().clone(), console.settings().clone());
    let out = printer.clone();
    registry.register(
        "con_prompt",
        CommandDefinition::builder()
            .description("Change the prompt shown before each input line.")
            .param("prompt", ArgumentKind::String)
            .action(move |args| {
                set.set_prompt(format!("{} ", args.string(0)?));
                Ok(())
            })
            .bare_action(move || {
                out.print(&format!("Prompt: {}", get.prompt().trim_end()), PrintLevel::Normal);
                Ok(())
            })
            .build(),
    )?;

    let (set, get) = (terminal.clone(), terminal.clone());
    let out = printer.clone();
    registry.register(
        "con_color",
        CommandDefinition::builder()
            .description("Change whether or not console output is coloured by severity.")
            .param("enabled", ArgumentKind::Boolean)
            .action(move |args| {
                set.set_color(args.boolean(0)?);
                Ok(())
            })
            .bare_action(move || {
                out.print(&format!("Colored output: {}", get.color()), PrintLevel::Normal);
                Ok(())
            })
            .build(),
    )?;

    let (set, get) = (console.settings().clone(), console.settings().clone());
    let out = printer.clone();
    registry.register(
        "con_echo",
        CommandDefinition::builder()
            .description("Change whether submitted lines are echoed back.")
            .param("enabled", ArgumentKind::Boolean)
            .action(move |args| {
                set.set_echo_input(args.boolean(0)?);
                Ok(())
            })
            .bare_action(move || {
                out.print(&format!("Echo input: {}", get.echo_input()), PrintLevel::Normal);
                Ok(())
            })
            .build(),
    )?;

    let (set, get) = (console.history().clone(), console.history().clone());
    let out = printer;
    registry.register(
        "con_history",
        CommandDefinition::builder()
            .description("Change how many submitted lines are remembered. Alone, list them.")
            .param("size", ArgumentKind::Integer)
            .action(move |args| {
                let size = args.integer(0)?.clamp(1, MAX_HISTORY as i64);
                set.lock().set_capacity(size as usize);
                Ok(())
            })
            .bare_action(move || {
                let history = get.lock();
                out.print(
                    &format!("History ({} of {}):", history.len(), history.capacity()),
                    PrintLevel::Normal,
                );
                for (i, line) in history.entries().enumerate() {
                    out.print(&format!("{:>4}  {line}", i + 1), PrintLevel::Normal);
                }
                Ok(())
            })
            .build(),
    )?;

    Ok(())
}
