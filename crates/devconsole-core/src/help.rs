//! Self-describing help text.

use crate::error::UnknownCommand;
use crate::registry::Registry;

impl Registry {
    /// Description of `name` followed by its argument list.
    ///
    /// ```
    /// use devconsole_core::{ArgumentKind, CommandDefinition, Registry};
    ///
    /// let registry = Registry::new();
    /// registry
    ///     .register(
    ///         "con_fontSize",
    ///         CommandDefinition::builder()
    ///             .description("Change the console's font size.")
    ///             .param("size", ArgumentKind::Integer)
    ///             .action(|_| Ok(()))
    ///             .build(),
    ///     )
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     registry.describe("con_fontSize").unwrap(),
    ///     "Change the console's font size.\nArgs: size(Integer)"
    /// );
    /// ```
    pub fn describe(&self, name: &str) -> Result<String, UnknownCommand> {
        let command = self
            .lookup(name)
            .ok_or_else(|| UnknownCommand(name.to_owned()))?;
        Ok(format!("{}\nArgs: {}", command.description(), command.usage()))
    }

    /// `(name, description)` for every command, in registration order.
    pub fn describe_all(&self) -> Vec<(String, String)> {
        self.descriptors()
            .iter()
            .map(|c| (c.name().to_owned(), c.description().to_owned()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandDefinition;

    #[test]
    fn test_describe_without_parameters() {
        let registry = Registry::new();
        registry
            .register(
                "clear",
                CommandDefinition::builder()
                    .description("Clear the console's log.")
                    .action(|_| Ok(()))
                    .build(),
            )
            .unwrap();

        assert_eq!(
            registry.describe("clear").unwrap(),
            "Clear the console's log.\nArgs: "
        );
    }

    #[test]
    fn test_describe_unknown() {
        let registry = Registry::new();
        assert_eq!(
            registry.describe("ghost"),
            Err(UnknownCommand("ghost".into()))
        );
    }

    #[test]
    fn test_describe_all_in_order() {
        let registry = Registry::new();
        for (name, desc) in [("b", "second letter"), ("a", ""), ("c", "third")] {
            registry
                .register(
                    name,
                    CommandDefinition::builder()
                        .description(desc)
                        .action(|_| Ok(()))
                        .build(),
                )
                .unwrap();
        }

        assert_eq!(
            registry.describe_all(),
            vec![
                ("b".to_string(), "second letter".to_string()),
                ("a".to_string(), String::new()),
                ("c".to_string(), "third".to_string()),
            ]
        );
    }
}
