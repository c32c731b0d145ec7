//! Line dispatch.
//!
//! One input line maps to at most one command. The first whitespace token is
//! the command name; the remaining tokens are coerced, in order, against the
//! command's parameter schema. Coercion stops at the first bad token so a
//! failure always names exactly one problem.

use crate::command::{Arguments, CommandDescriptor};
use crate::error::{DispatchError, DispatchWarning};
use crate::registry::Registry;
use crate::value::Value;
use tracing::{Level, debug, span};

/// Which callable a dispatch ended up running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// Empty line; nothing ran.
    Idle,
    /// The main action ran.
    Action,
    /// The read action ran.
    Bare,
}

/// A successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    /// Resolved command name, `None` for an empty line.
    pub command: Option<String>,
    /// What was invoked.
    pub invocation: Invocation,
    /// Non-fatal conditions encountered along the way.
    pub warnings: Vec<DispatchWarning>,
}

impl Dispatched {
    fn idle() -> Self {
        Self {
            command: None,
            invocation: Invocation::Idle,
            warnings: Vec::new(),
        }
    }
}

/// Split a line into whitespace-delimited tokens.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

impl Registry {
    /// Parse `line`, resolve its command and run it.
    ///
    /// # Examples
    ///
    /// ```
    /// use devconsole_core::{ArgumentKind, CommandDefinition, Invocation, Registry};
    ///
    /// let registry = Registry::new();
    /// registry
    ///     .register(
    ///         "move",
    ///         CommandDefinition::builder()
    ///             .param("x", ArgumentKind::Integer)
    ///             .param("y", ArgumentKind::Integer)
    ///             .action(|args| {
    ///                 assert_eq!((args.integer(0)?, args.integer(1)?), (3, 4));
    ///                 Ok(())
    ///             })
    ///             .build(),
    ///     )
    ///     .unwrap();
    ///
    /// let done = registry.dispatch("move 3 4").unwrap();
    /// assert_eq!(done.invocation, Invocation::Action);
    /// assert!(registry.dispatch("move 3").is_err());
    /// ```
    pub fn dispatch(&self, line: &str) -> Result<Dispatched, DispatchError> {
        let tokens = tokenize(line);
        let Some((&name, args)) = tokens.split_first() else {
            return Ok(Dispatched::idle());
        };

        let Some(command) = self.resolve_for_dispatch(name) else {
            debug!(command = %name, "Unknown command");
            return Err(DispatchError::UnknownCommand(name.to_owned()));
        };

        let command_span = span!(
            Level::DEBUG,
            "console.command",
            command = %name,
            arguments = args.len(),
        );
        let _enter = command_span.enter();

        let result = run(&command, args);
        match &result {
            Ok(done) => {
                for warning in &done.warnings {
                    debug!(code = warning.error_code(), warning = %warning, "Command warning");
                }
            }
            Err(e) => debug!(code = e.error_code(), error = %e, "Command error"),
        }
        result
    }
}

fn run(command: &CommandDescriptor, args: &[&str]) -> Result<Dispatched, DispatchError> {
    let name = command.name();
    let parameters = command.parameters();
    let expected = parameters.len();
    let mut warnings = Vec::new();

    let invocation = if expected == 0 {
        // No-argument commands ignore any trailing text.
        invoke(command, &[], &mut warnings)?;
        Invocation::Action
    } else if let (true, Some(bare)) = (args.is_empty(), command.bare_action()) {
        bare().map_err(|source| DispatchError::ActionFailed {
            command: name.to_owned(),
            source,
            warnings: Vec::new(),
        })?;
        Invocation::Bare
    } else if args.len() < expected {
        return Err(DispatchError::InsufficientArguments {
            command: name.to_owned(),
            expected,
            supplied: args.len(),
            usage: command.usage().clone(),
        });
    } else {
        let values = parameters
            .iter()
            .zip(args)
            .enumerate()
            .map(|(index, (param, token))| {
                param
                    .kind
                    .parse(token)
                    .map_err(|mismatch| DispatchError::ArgumentTypeMismatch {
                        command: name.to_owned(),
                        index,
                        parameter: param.name.clone(),
                        mismatch,
                        usage: command.usage().clone(),
                    })
            })
            .collect::<Result<Vec<Value>, _>>()?;

        if args.len() > expected {
            warnings.push(DispatchWarning::ExtraArguments {
                command: name.to_owned(),
                expected,
                ignored: args[expected..].iter().map(|t| (*t).to_owned()).collect(),
            });
        }

        invoke(command, &values, &mut warnings)?;
        Invocation::Action
    };

    Ok(Dispatched {
        command: Some(name.to_owned()),
        invocation,
        warnings,
    })
}

fn invoke(
    command: &CommandDescriptor,
    values: &[Value],
    warnings: &mut Vec<DispatchWarning>,
) -> Result<(), DispatchError> {
    command
        .invoke(Arguments::new(values))
        .map_err(|source| DispatchError::ActionFailed {
            command: command.name().to_owned(),
            source,
            warnings: std::mem::take(warnings),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandDefinition;
    use crate::kind::ArgumentKind;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_tokenize_collapses_whitespace() {
        assert_eq!(tokenize("  move\t3   4 \n"), ["move", "3", "4"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_empty_line_is_idle() {
        let registry = Registry::new();
        let done = registry.dispatch("   ").unwrap();
        assert_eq!(done, Dispatched::idle());
    }

    #[test]
    fn test_unknown_command() {
        let registry = Registry::new();
        let err = registry.dispatch("nope 1 2").unwrap_err();
        assert!(matches!(err, DispatchError::UnknownCommand(ref n) if n == "nope"));
    }

    #[test]
    fn test_mixed_kinds_are_coerced_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let registry = Registry::new();
        registry
            .register(
                "spawn",
                CommandDefinition::builder()
                    .param("what", ArgumentKind::String)
                    .param("scale", ArgumentKind::Float)
                    .param("hostile", ArgumentKind::Boolean)
                    .action(move |args| {
                        sink.lock().extend_from_slice(args.values());
                        Ok(())
                    })
                    .build(),
            )
            .unwrap();

        registry.dispatch("spawn crate 1.5 false").unwrap();
        assert_eq!(
            *seen.lock(),
            vec![Value::from("crate"), Value::Float(1.5), Value::Boolean(false)]
        );
    }

    #[test]
    fn test_first_mismatch_wins() {
        let registry = Registry::new();
        registry
            .register(
                "pair",
                CommandDefinition::builder()
                    .param("a", ArgumentKind::Boolean)
                    .param("b", ArgumentKind::Integer)
                    .action(|_| Ok(()))
                    .build(),
            )
            .unwrap();

        match registry.dispatch("pair maybe nope").unwrap_err() {
            DispatchError::ArgumentTypeMismatch {
                index, parameter, mismatch, ..
            } => {
                assert_eq!(index, 0);
                assert_eq!(parameter, "a");
                assert_eq!(mismatch.token, "maybe");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_action_error_is_surfaced() {
        let registry = Registry::new();
        registry
            .register(
                "fail",
                CommandDefinition::builder()
                    .action(|_| Err("disk on fire".into()))
                    .build(),
            )
            .unwrap();

        let err = registry.dispatch("fail").unwrap_err();
        assert_eq!(err.error_code(), "action_failed");
        assert_eq!(err.to_string(), "fail: disk on fire");
    }

    #[test]
    fn test_action_error_keeps_extra_argument_warning() {
        let registry = Registry::new();
        registry
            .register(
                "boom",
                CommandDefinition::builder()
                    .param("n", ArgumentKind::Integer)
                    .action(|_| Err("nope".into()))
                    .build(),
            )
            .unwrap();

        let err = registry.dispatch("boom 1 2 3").unwrap_err();
        assert_eq!(err.error_code(), "action_failed");
        assert_eq!(
            err.warnings(),
            [DispatchWarning::ExtraArguments {
                command: "boom".into(),
                expected: 1,
                ignored: vec!["2".into(), "3".into()],
            }]
        );
    }

    #[test]
    fn test_bare_action_error_is_surfaced() {
        let registry = Registry::new();
        registry
            .register(
                "size",
                CommandDefinition::builder()
                    .param("n", ArgumentKind::Integer)
                    .action(|_| Ok(()))
                    .bare_action(|| Err("no value yet".into()))
                    .build(),
            )
            .unwrap();

        let err = registry.dispatch("size").unwrap_err();
        assert_eq!(err.error_code(), "action_failed");
    }

    #[test]
    fn test_action_may_reenter_registry() {
        let registry = Arc::new(Registry::new());
        let weak = Arc::downgrade(&registry);
        registry
            .register(
                "spawner",
                CommandDefinition::builder()
                    .action(move |_| {
                        if let Some(registry) = weak.upgrade() {
                            registry.register(
                                "spawned",
                                CommandDefinition::builder().action(|_| Ok(())).build(),
                            )?;
                        }
                        Ok(())
                    })
                    .build(),
            )
            .unwrap();

        registry.dispatch("spawner").unwrap();
        assert!(registry.contains("spawned"));
    }

    #[test]
    fn test_dispatch_counts_uses() {
        let registry = Registry::new();
        registry
            .register("ping", CommandDefinition::builder().action(|_| Ok(())).build())
            .unwrap();

        registry.dispatch("ping").unwrap();
        registry.dispatch("ping x").unwrap();
        let _ = registry.dispatch("pong");

        assert_eq!(registry.command_stats(), vec![("ping".to_string(), 2)]);
    }
}
