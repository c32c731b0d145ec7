//! Coerced argument values.

use crate::kind::ArgumentKind;
use std::fmt;

/// A coerced argument, tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// See [`ArgumentKind::Integer`].
    Integer(i64),
    /// See [`ArgumentKind::Float`].
    Float(f64),
    /// See [`ArgumentKind::String`].
    String(String),
    /// See [`ArgumentKind::Boolean`].
    Boolean(bool),
}

impl Value {
    /// Kind of this value.
    pub fn kind(&self) -> ArgumentKind {
        match self {
            Self::Integer(_) => ArgumentKind::Integer,
            Self::Float(_) => ArgumentKind::Float,
            Self::String(_) => ArgumentKind::String,
            Self::Boolean(_) => ArgumentKind::Boolean,
        }
    }

    /// Integer payload, if this is an Integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Float payload, if this is a Float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// String payload, if this is a String.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Boolean payload, if this is a Boolean.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }
}

/// Formats the value as a token that parses back to the same value.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
            Self::Boolean(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kind() {
        assert_eq!(Value::from(3_i64).kind(), ArgumentKind::Integer);
        assert_eq!(Value::from(0.5_f64).kind(), ArgumentKind::Float);
        assert_eq!(Value::from("x").kind(), ArgumentKind::String);
        assert_eq!(Value::from(true).kind(), ArgumentKind::Boolean);
    }

    #[test]
    fn test_accessors_are_kind_strict() {
        let v = Value::Integer(1);
        assert_eq!(v.as_integer(), Some(1));
        assert_eq!(v.as_float(), None);
        assert_eq!(v.as_boolean(), None);
        assert_eq!(v.as_str(), None);
    }

    #[test]
    fn test_float_display_keeps_fraction() {
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
        assert_eq!(Value::Float(-2.0).to_string(), "-2");
        assert_eq!(
            ArgumentKind::Float.parse(&Value::Float(-2.0).to_string()),
            Ok(Value::Float(-2.0))
        );
    }
}
