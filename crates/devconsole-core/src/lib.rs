//! # devconsole-core
//!
//! Command registry and dispatch engine for an in-process, text-driven
//! developer console.
//!
//! ## Features
//!
//! - Named commands with ordered, typed parameter lists
//!   (Integer, Float, String, Boolean)
//! - Registration-time validation of names and parameter schemas
//! - Whitespace tokenizing, strict per-kind coercion, precise failures
//! - Optional read action for commands typed without arguments
//! - Prefix autocomplete and self-describing help
//! - A single readers-writer lock; registration may happen from several sites
//!
#![deny(clippy::all)]
#![warn(missing_docs)]

//! ## Quick Start
//!
//! ```rust
//! use devconsole_core::{ArgumentKind, CommandDefinition, DispatchError, Registry};
//!
//! let registry = Registry::new();
//! registry
//!     .register(
//!         "con_fontSize",
//!         CommandDefinition::builder()
//!             .description("Change the console's font size.")
//!             .param("size", ArgumentKind::Integer)
//!             .action(|args| {
//!                 let _size = args.integer(0)?;
//!                 Ok(())
//!             })
//!             .bare_action(|| Ok(()))
//!             .build(),
//!     )
//!     .expect("fresh registry");
//!
//! registry.dispatch("con_fontSize 24").expect("valid line");
//! registry.dispatch("con_fontSize").expect("read path");
//!
//! match registry.dispatch("con_fontSize huge") {
//!     Err(DispatchError::ArgumentTypeMismatch { usage, .. }) => {
//!         assert_eq!(usage.to_string(), "size(Integer)");
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//!
//! assert_eq!(registry.suggest("con_"), ["con_fontSize"]);
//! ```

pub mod builtin;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod help;
pub mod kind;
pub mod registry;
pub mod sink;
pub mod suggest;
pub mod value;

pub use self::command::{
    Action, Arguments, BareAction, CommandBuilder, CommandDefinition, CommandDescriptor,
    ParameterSpec, Usage,
};
pub use self::dispatch::{Dispatched, Invocation, tokenize};
pub use self::error::{
    ActionError, ActionResult, ArgumentError, DispatchError, DispatchWarning, RegistrationError,
    TypeMismatch, UnknownCommand, UnsupportedType,
};
pub use self::kind::ArgumentKind;
pub use self::registry::{Registry, Unregistered};
pub use self::sink::{MemorySink, PrintLevel, PrintSink};
pub use self::value::Value;
