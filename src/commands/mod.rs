//! Commands the console registers for itself.
//!
//! - [`settings`]: `con_*` commands that change console behaviour. Typed
//!   alone they print the current value.
//! - [`session`]: `clear`, `stats`, `quit`.

pub mod session;
pub mod settings;

use crate::console::Console;
use crate::output::TerminalSink;
use devconsole_core::RegistrationError;
use std::sync::Arc;

/// Register every console command.
pub fn register(console: &Console, terminal: &Arc<TerminalSink>) -> Result<(), RegistrationError> {
    settings::register(console, terminal)?;
    session::register(console, terminal)?;
    Ok(())
}
