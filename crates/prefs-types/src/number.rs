use std::fmt;

use crate::error::TypeError;
use crate::value::Value;

/// Generic numeric view over the store's numeric primitives.
///
/// The host store treats integers, floats and booleans as one mutually
/// convertible family. Reading any member through `Number` lets callers ask
/// for the representation they want regardless of how it was written.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Number {
    /// Integer reading. Floats truncate toward zero (saturating at the
    /// `i64` bounds, NaN becomes 0); booleans become 0 or 1.
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Integer(i) => i,
            Self::Float(f) => f as i64,
            Self::Bool(b) => i64::from(b),
        }
    }

    /// Floating-point reading.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Integer(i) => i as f64,
            Self::Float(f) => f,
            Self::Bool(b) => {
                if b {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Boolean reading: `true` for any nonzero value.
    pub fn as_bool(self) -> bool {
        match self {
            Self::Integer(i) => i != 0,
            Self::Float(f) => f != 0.0,
            Self::Bool(b) => b,
        }
    }

    /// The zero number, used as the default numeric reading.
    pub const fn zero() -> Self {
        Self::Integer(0)
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        match number {
            Number::Integer(i) => Value::Integer(i),
            Number::Float(f) => Value::Float(f),
            Number::Bool(b) => Value::Bool(b),
        }
    }
}

impl TryFrom<&Value> for Number {
    type Error = TypeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Integer(i) => Ok(Self::Integer(*i)),
            Value::Float(f) => Ok(Self::Float(*f)),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            other => Err(TypeError::NotNumeric(other.kind())),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{}", i64::from(*b)),
        }
    }
}
