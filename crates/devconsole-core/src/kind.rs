//! Argument kinds and token coercion.
//!
//! The set of kinds a command parameter may declare is closed: integers,
//! floats, strings and booleans. Coercion never converts between kinds, so
//! `"1"` is an Integer and a String but never a Boolean.

use crate::error::{TypeMismatch, UnsupportedType};
use crate::value::Value;
use std::fmt;
use std::str::FromStr;

/// Value kind of a command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentKind {
    /// 64-bit signed base-10 integer.
    Integer,
    /// 64-bit float, `.` as the decimal separator.
    Float,
    /// The token verbatim.
    String,
    /// Exactly `true` or `false`.
    Boolean,
}

impl ArgumentKind {
    /// Every supported kind, in declaration order.
    pub const ALL: [ArgumentKind; 4] = [
        ArgumentKind::Integer,
        ArgumentKind::Float,
        ArgumentKind::String,
        ArgumentKind::Boolean,
    ];

    /// Name used in usage text and error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::String => "String",
            Self::Boolean => "Boolean",
        }
    }

    /// Coerce a single token into a value of this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use devconsole_core::{ArgumentKind, Value};
    ///
    /// assert_eq!(ArgumentKind::Integer.parse("-12"), Ok(Value::Integer(-12)));
    /// assert!(ArgumentKind::Boolean.parse("1").is_err());
    /// ```
    pub fn parse(self, token: &str) -> Result<Value, TypeMismatch> {
        let value = match self {
            Self::Integer => token.parse::<i64>().ok().map(Value::Integer),
            // `f64::from_str` also accepts "inf" and "NaN"; those never round-trip
            // through the console, and out-of-range literals saturate to infinity.
            Self::Float => token
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Value::Float),
            Self::String => Some(Value::String(token.to_owned())),
            Self::Boolean => match token {
                "true" => Some(Value::Boolean(true)),
                "false" => Some(Value::Boolean(false)),
                _ => None,
            },
        };

        value.ok_or_else(|| TypeMismatch {
            expected: self,
            token: token.to_owned(),
        })
    }
}

impl fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ArgumentKind {
    type Err = UnsupportedType;

    /// Resolve a declared type name. Accepts the display names and the
    /// usual primitive spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Integer" | "int" | "i32" | "i64" | "integer" => Ok(Self::Integer),
            "Float" | "float" | "f32" | "f64" => Ok(Self::Float),
            "String" | "string" | "str" => Ok(Self::String),
            "Boolean" | "bool" | "boolean" => Ok(Self::Boolean),
            other => Err(UnsupportedType(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_accepts_signed_decimal() {
        assert_eq!(ArgumentKind::Integer.parse("42"), Ok(Value::Integer(42)));
        assert_eq!(ArgumentKind::Integer.parse("-7"), Ok(Value::Integer(-7)));
        assert_eq!(ArgumentKind::Integer.parse("+7"), Ok(Value::Integer(7)));
    }

    #[test]
    fn integer_rejects_junk_and_overflow() {
        for token in ["4a", "a", "1.5", "", "99999999999999999999", "0x10"] {
            let err = ArgumentKind::Integer.parse(token).unwrap_err();
            assert_eq!(err.expected, ArgumentKind::Integer);
            assert_eq!(err.token, token);
        }
    }

    #[test]
    fn float_is_locale_invariant() {
        assert_eq!(ArgumentKind::Float.parse("0.25"), Ok(Value::Float(0.25)));
        assert_eq!(ArgumentKind::Float.parse("-3"), Ok(Value::Float(-3.0)));
        assert!(ArgumentKind::Float.parse("0,25").is_err());
    }

    #[test]
    fn float_rejects_non_finite() {
        for token in ["inf", "-inf", "NaN", "infinity", "1e400"] {
            assert!(ArgumentKind::Float.parse(token).is_err(), "{token}");
        }
    }

    #[test]
    fn boolean_is_exact_and_case_sensitive() {
        assert_eq!(ArgumentKind::Boolean.parse("true"), Ok(Value::Boolean(true)));
        assert_eq!(ArgumentKind::Boolean.parse("false"), Ok(Value::Boolean(false)));
        for token in ["True", "FALSE", "1", "0", "yes"] {
            assert!(ArgumentKind::Boolean.parse(token).is_err(), "{token}");
        }
    }

    #[test]
    fn string_is_verbatim() {
        assert_eq!(
            ArgumentKind::String.parse("Hello!"),
            Ok(Value::String("Hello!".into()))
        );
    }

    #[test]
    fn declared_type_names_resolve() {
        assert_eq!("int".parse(), Ok(ArgumentKind::Integer));
        assert_eq!("f32".parse(), Ok(ArgumentKind::Float));
        assert_eq!("Boolean".parse(), Ok(ArgumentKind::Boolean));
        assert_eq!(
            "Vector2".parse::<ArgumentKind>(),
            Err(UnsupportedType("Vector2".into()))
        );
    }

    #[test]
    fn display_names_resolve_back() {
        for kind in ArgumentKind::ALL {
            assert_eq!(kind.display_name().parse(), Ok(kind));
        }
    }
}
