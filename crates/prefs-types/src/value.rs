use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::number::Number;

/// Nested map primitive: string keys to stored values.
pub type Dictionary = BTreeMap<String, Value>;

/// The kind tag of a stored primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    String,
    Integer,
    Float,
    Bool,
    Data,
    Date,
    Array,
    Dictionary,
}

impl ValueKind {
    /// Returns `true` for the kinds readable through [`Number`].
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Bool)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Data => "data",
            Self::Date => "date",
            Self::Array => "array",
            Self::Dictionary => "dictionary",
        };
        f.write_str(name)
    }
}

/// A single primitive held by the preferences store.
///
/// A key maps to at most one `Value` at a time; writing replaces the prior
/// value entirely, whatever its kind. Absence is modelled as `Option::None`
/// at every API boundary rather than as a variant here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// UTF-8 string.
    String(String),
    /// 64-bit signed integer.
    Integer(i64),
    /// Double-precision float, including NaN and the infinities.
    Float(#[serde(with = "crate::float")] f64),
    /// Boolean.
    Bool(bool),
    /// Opaque binary blob.
    Data(Bytes),
    /// Point in time.
    Date(DateTime<Utc>),
    /// Heterogeneous sequence.
    Array(Vec<Value>),
    /// Heterogeneous map with string keys.
    Dictionary(Dictionary),
}

impl Value {
    /// The kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::Bool(_) => ValueKind::Bool,
            Self::Data(_) => ValueKind::Data,
            Self::Date(_) => ValueKind::Date,
            Self::Array(_) => ValueKind::Array,
            Self::Dictionary(_) => ValueKind::Dictionary,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view; `None` unless the value is an integer, float or bool.
    pub fn as_number(&self) -> Option<Number> {
        Number::try_from(self).ok()
    }

    pub fn as_data(&self) -> Option<&Bytes> {
        match self {
            Self::Data(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Self::Dictionary(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Self::Float(f64::from(f))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Bytes> for Value {
    fn from(data: Bytes) -> Self {
        Self::Data(data)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(date: DateTime<Utc>) -> Self {
        Self::Date(date)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

impl From<Dictionary> for Value {
    fn from(map: Dictionary) -> Self {
        Self::Dictionary(map)
    }
}
