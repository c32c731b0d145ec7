//! devconsole - interactive developer console.
//!
//! Reads lines from standard input and runs them as console commands.

mod commands;
mod completion;
mod config;
mod console;
mod output;
mod telemetry;

use crate::config::{Config, LogConfig};
use crate::console::Console;
use crate::output::{Printer, TerminalSink};
use devconsole_core::{PrintLevel, PrintSink};
use std::io::{IsTerminal, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn};

const DEFAULT_CONFIG: &str = "devconsole.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config_path = std::env::args().nth(1);
    let config = match Config::load_or_default(config_path.as_deref(), DEFAULT_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            telemetry::init(&LogConfig::default());
            error!(
                path = config_path.as_deref().unwrap_or(DEFAULT_CONFIG),
                code = e.error_code(),
                error = %e,
                "Failed to load config"
            );
            return Err(e.into());
        }
    };
    telemetry::init(&config.log);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting devconsole");

    let printer = Arc::new(Printer::new());
    let console = Console::new(&config.console, Arc::clone(&printer))?;
    let terminal = Arc::new(TerminalSink::stdout(config.console.color));
    commands::register(&console, &terminal)?;
    info!(commands = console.registry().len(), "Commands registered");

    // Queued until the terminal is attached below.
    console.print(
        &format!(
            "devconsole {} // type 'help' for commands",
            env!("CARGO_PKG_VERSION")
        ),
        PrintLevel::Success,
    );

    let ready = {
        let printer = Arc::clone(&printer);
        tokio::spawn(async move {
            printer.ready().wait().await;
            info!("Console ready");
        })
    };

    debug!(queued = printer.pending(), "Attaching terminal");
    printer.attach(terminal.clone())?;
    ready.await?;

    let interactive = std::io::stdin().is_terminal();
    let mut input = BufReader::new(tokio::io::stdin());
    let mut buf = Vec::new();

    while !console.settings().quit_requested() {
        if interactive {
            show_prompt(&console.settings().prompt());
        }

        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let Ok(line) = std::str::from_utf8(&buf) else {
            warn!(bytes = buf.len(), "Discarding input line that is not valid UTF-8");
            console.print("Input is not valid UTF-8. Line ignored.", PrintLevel::Error);
            continue;
        };
        let line = line.trim_end_matches(['\r', '\n']);

        match line.strip_suffix('\t') {
            Some(partial) => match console.complete(partial) {
                Some(suggestion) => terminal.print(&suggestion, PrintLevel::Normal),
                None => terminal.print("No suggestions.", PrintLevel::Warning),
            },
            None => console.submit(line),
        }
    }

    info!("Console closed");
    Ok(())
}

fn show_prompt(prompt: &str) {
    let mut out = std::io::stdout().lock();
    if let Err(e) = out.write_all(prompt.as_bytes()).and_then(|()| out.flush()) {
        warn!(error = %e, "Failed to write prompt");
    }
}
