//! Error types for the console engine.
//!
//! Registration and dispatch failures are returned as typed results; the
//! caller decides whether to log, display, or ignore them. Warnings
//! ([`DispatchWarning`]) accompany a successful dispatch instead of
//! aborting it.

use crate::command::Usage;
use crate::kind::ArgumentKind;
use thiserror::Error;

/// Error produced by a command action.
pub type ActionError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type returned by command actions.
pub type ActionResult = Result<(), ActionError>;

// ============================================================================
// Coercion errors
// ============================================================================

/// A token could not be coerced to the declared argument kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, got {token:?}")]
pub struct TypeMismatch {
    /// The kind the parameter declares.
    pub expected: ArgumentKind,
    /// The offending token, verbatim.
    pub token: String,
}

/// A declared parameter type name does not map onto a supported kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported argument type: {0}")]
pub struct UnsupportedType(pub String);

/// Lookup of a command that is not registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command: {0}")]
pub struct UnknownCommand(pub String);

/// Typed access to coerced arguments failed inside an action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// Fewer arguments than the accessed position.
    #[error("no argument at position {0}")]
    Missing(usize),

    /// The stored value has a different kind.
    #[error("argument {index} is {actual}, not {expected}")]
    WrongKind {
        /// Position of the argument.
        index: usize,
        /// Kind the accessor asked for.
        expected: ArgumentKind,
        /// Kind actually stored.
        actual: ArgumentKind,
    },
}

// ============================================================================
// Registration errors
// ============================================================================

/// Errors that can occur while registering a command.
///
/// A failed registration leaves the registry untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The name is empty or contains whitespace.
    #[error("invalid command name: {0:?}")]
    InvalidCommandName(String),

    /// A command with this name is already registered.
    #[error("command {0:?} already exists")]
    DuplicateCommand(String),

    /// The definition has no main action.
    #[error("command {0:?} has no action")]
    MissingAction(String),

    /// A declared parameter type name did not resolve to an argument kind.
    #[error("command {command:?} declares parameter {parameter:?} with an unsupported type: {type_name}")]
    InvalidParameterType {
        /// Command being registered.
        command: String,
        /// Name of the offending parameter.
        parameter: String,
        /// The declared type name that failed to resolve.
        type_name: String,
    },
}

impl RegistrationError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCommandName(_) => "invalid_command_name",
            Self::DuplicateCommand(_) => "duplicate_command",
            Self::MissingAction(_) => "missing_action",
            Self::InvalidParameterType { .. } => "invalid_parameter_type",
        }
    }
}

// ============================================================================
// Dispatch errors
// ============================================================================

/// Errors that abort the dispatch of an input line.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No command is registered under the first token.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Fewer argument tokens than declared parameters.
    #[error("{command}: expected {expected} arguments, got {supplied}")]
    InsufficientArguments {
        /// Resolved command name.
        command: String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of argument tokens supplied.
        supplied: usize,
        /// Parameter list for rendering usage help.
        usage: Usage,
    },

    /// An argument token did not coerce to its parameter's kind.
    #[error("{command}: argument {} ({parameter}): {mismatch}", index + 1)]
    ArgumentTypeMismatch {
        /// Resolved command name.
        command: String,
        /// Zero-based position of the first argument that failed coercion.
        index: usize,
        /// Name of the parameter at `index`.
        parameter: String,
        /// What failed to coerce.
        mismatch: TypeMismatch,
        /// Parameter list for rendering usage help.
        usage: Usage,
    },

    /// The invoked action returned an error.
    #[error("{command}: {source}")]
    ActionFailed {
        /// Resolved command name.
        command: String,
        /// Error returned by the action.
        source: ActionError,
        /// Warnings raised before the action ran.
        warnings: Vec<DispatchWarning>,
    },
}

impl DispatchError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCommand(_) => "unknown_command",
            Self::InsufficientArguments { .. } => "insufficient_arguments",
            Self::ArgumentTypeMismatch { .. } => "argument_type_mismatch",
            Self::ActionFailed { .. } => "action_failed",
        }
    }

    /// Usage of the affected command, where the failure warrants one.
    pub fn usage(&self) -> Option<&Usage> {
        match self {
            Self::InsufficientArguments { usage, .. } | Self::ArgumentTypeMismatch { usage, .. } => {
                Some(usage)
            }
            Self::UnknownCommand(_) | Self::ActionFailed { .. } => None,
        }
    }

    /// Warnings raised before the failure.
    pub fn warnings(&self) -> &[DispatchWarning] {
        match self {
            Self::ActionFailed { warnings, .. } => warnings,
            _ => &[],
        }
    }
}

/// Non-fatal conditions reported alongside a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchWarning {
    /// More argument tokens than declared parameters; the rest were ignored.
    #[error("{command}: expected {expected} arguments, ignoring {}", ignored.len())]
    ExtraArguments {
        /// Resolved command name.
        command: String,
        /// Number of declared parameters.
        expected: usize,
        /// Trailing tokens that were discarded.
        ignored: Vec<String>,
    },
}

impl DispatchWarning {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ExtraArguments { .. } => "extra_arguments",
        }
    }
}
