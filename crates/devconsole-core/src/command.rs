//! Command definitions and registered command descriptors.
//!
//! A [`CommandDefinition`] is what a registrant hands to the registry: it may
//! be incomplete (no action yet) and may declare parameter types by name.
//! Registration validates it and produces a [`CommandDescriptor`], whose
//! parameter schema is fully resolved. Everything past registration works on
//! the resolved schema only.

use crate::error::{ActionResult, ArgumentError, RegistrationError};
use crate::kind::ArgumentKind;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Main action of a command, called with the coerced arguments.
pub type Action = Arc<dyn Fn(Arguments<'_>) -> ActionResult + Send + Sync>;

/// Read action of a command, called when the command is typed without arguments.
pub type BareAction = Arc<dyn Fn() -> ActionResult + Send + Sync>;

/// One formal parameter of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    /// Parameter name, shown in usage text.
    pub name: String,
    /// Declared kind.
    pub kind: ArgumentKind,
}

impl ParameterSpec {
    /// Create a parameter spec.
    pub fn new(name: impl Into<String>, kind: ArgumentKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

impl fmt::Display for ParameterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.kind)
    }
}

/// Rendered parameter list of a command: `x(Integer), y(Integer)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Usage(Vec<ParameterSpec>);

impl Usage {
    /// Wrap a parameter list.
    pub fn new(parameters: Vec<ParameterSpec>) -> Self {
        Self(parameters)
    }

    /// The parameters, in order.
    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.0
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, param) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        Ok(())
    }
}

/// Parameter type as written by the registrant.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DeclaredType {
    Kind(ArgumentKind),
    Named(String),
}

/// Unvalidated command, ready to be handed to [`Registry::register`].
///
/// [`Registry::register`]: crate::Registry::register
#[derive(Clone, Default)]
pub struct CommandDefinition {
    description: String,
    parameters: Vec<(String, DeclaredType)>,
    action: Option<Action>,
    bare_action: Option<BareAction>,
}

impl CommandDefinition {
    /// Start building a definition.
    pub fn builder() -> CommandBuilder {
        CommandBuilder::default()
    }

    /// Validate the definition and resolve its parameter schema.
    ///
    /// Name and uniqueness checks belong to the registry; this covers what
    /// the definition can decide on its own.
    pub(crate) fn resolve(self, name: &str) -> Result<CommandDescriptor, RegistrationError> {
        let action = self
            .action
            .ok_or_else(|| RegistrationError::MissingAction(name.to_owned()))?;

        let parameters = self
            .parameters
            .into_iter()
            .map(|(param, declared)| match declared {
                DeclaredType::Kind(kind) => Ok(ParameterSpec::new(param, kind)),
                DeclaredType::Named(type_name) => match type_name.parse::<ArgumentKind>() {
                    Ok(kind) => Ok(ParameterSpec::new(param, kind)),
                    Err(_) => Err(RegistrationError::InvalidParameterType {
                        command: name.to_owned(),
                        parameter: param,
                        type_name,
                    }),
                },
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CommandDescriptor {
            name: name.to_owned(),
            description: self.description,
            usage: Usage::new(parameters),
            action,
            bare_action: self.bare_action,
        })
    }
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .field("has_action", &self.action.is_some())
            .field("has_bare_action", &self.bare_action.is_some())
            .finish()
    }
}

/// Builder for [`CommandDefinition`].
///
/// ```
/// use devconsole_core::{ArgumentKind, CommandDefinition};
///
/// let def = CommandDefinition::builder()
///     .description("Move the player.")
///     .param("x", ArgumentKind::Integer)
///     .param_declared("y", "int")
///     .action(|args| {
///         let (_x, _y) = (args.integer(0)?, args.integer(1)?);
///         Ok(())
///     })
///     .build();
/// # let _ = def;
/// ```
#[derive(Default)]
pub struct CommandBuilder {
    def: CommandDefinition,
}

impl CommandBuilder {
    /// Human-readable description shown by `help`.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.def.description = description.into();
        self
    }

    /// Append a parameter of a known kind.
    pub fn param(mut self, name: impl Into<String>, kind: ArgumentKind) -> Self {
        self.def.parameters.push((name.into(), DeclaredType::Kind(kind)));
        self
    }

    /// Append a parameter whose type is given by name (`"int"`, `"Boolean"`, ...).
    ///
    /// The name is resolved at registration; unknown names fail there with
    /// [`RegistrationError::InvalidParameterType`].
    pub fn param_declared(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.def
            .parameters
            .push((name.into(), DeclaredType::Named(type_name.into())));
        self
    }

    /// Main action.
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(Arguments<'_>) -> ActionResult + Send + Sync + 'static,
    {
        self.def.action = Some(Arc::new(action));
        self
    }

    /// Read action used when the command is typed with no arguments.
    pub fn bare_action<F>(mut self, action: F) -> Self
    where
        F: Fn() -> ActionResult + Send + Sync + 'static,
    {
        self.def.bare_action = Some(Arc::new(action));
        self
    }

    /// Finish the definition.
    pub fn build(self) -> CommandDefinition {
        self.def
    }
}

/// A registered command.
pub struct CommandDescriptor {
    name: String,
    description: String,
    usage: Usage,
    action: Action,
    bare_action: Option<BareAction>,
}

impl CommandDescriptor {
    /// The name users type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description, possibly empty.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Resolved parameters, in order.
    pub fn parameters(&self) -> &[ParameterSpec] {
        self.usage.parameters()
    }

    /// Parameter list for usage text.
    pub fn usage(&self) -> &Usage {
        &self.usage
    }

    /// Whether the command has a read action.
    pub fn has_bare_action(&self) -> bool {
        self.bare_action.is_some()
    }

    pub(crate) fn invoke(&self, args: Arguments<'_>) -> ActionResult {
        (self.action)(args)
    }

    pub(crate) fn bare_action(&self) -> Option<&BareAction> {
        self.bare_action.as_ref()
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("usage", &self.usage)
            .field("has_bare_action", &self.bare_action.is_some())
            .finish()
    }
}

/// Coerced arguments passed to an action, in parameter order.
#[derive(Debug, Clone, Copy)]
pub struct Arguments<'a> {
    values: &'a [Value],
}

impl<'a> Arguments<'a> {
    /// Wrap a slice of coerced values.
    pub fn new(values: &'a [Value]) -> Self {
        Self { values }
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw value at `index`.
    pub fn get(&self, index: usize) -> Option<&'a Value> {
        self.values.get(index)
    }

    /// All values.
    pub fn values(&self) -> &'a [Value] {
        self.values
    }

    /// Integer at `index`.
    pub fn integer(&self, index: usize) -> Result<i64, ArgumentError> {
        let value = self.expect_kind(index, ArgumentKind::Integer)?;
        value.as_integer().ok_or(ArgumentError::Missing(index))
    }

    /// Float at `index`.
    pub fn float(&self, index: usize) -> Result<f64, ArgumentError> {
        let value = self.expect_kind(index, ArgumentKind::Float)?;
        value.as_float().ok_or(ArgumentError::Missing(index))
    }

    /// String at `index`.
    pub fn string(&self, index: usize) -> Result<&'a str, ArgumentError> {
        let value = self.expect_kind(index, ArgumentKind::String)?;
        value.as_str().ok_or(ArgumentError::Missing(index))
    }

    /// Boolean at `index`.
    pub fn boolean(&self, index: usize) -> Result<bool, ArgumentError> {
        let value = self.expect_kind(index, ArgumentKind::Boolean)?;
        value.as_boolean().ok_or(ArgumentError::Missing(index))
    }

    fn expect_kind(&self, index: usize, expected: ArgumentKind) -> Result<&'a Value, ArgumentError> {
        let value = self.values.get(index).ok_or(ArgumentError::Missing(index))?;
        if value.kind() != expected {
            return Err(ArgumentError::WrongKind {
                index,
                expected,
                actual: value.kind(),
            });
        }
        Ok(value)
    }
}
