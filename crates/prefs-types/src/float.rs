//! Serde representation for stored floats.
//!
//! JSON has no literal for NaN or the infinities, and `serde_json` writes
//! them as `null`, which does not read back as a float. Human-readable
//! formats store them as the strings `"NaN"`, `"inf"` and `"-inf"`; binary
//! formats keep the raw `f64`.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};

const NAN: &str = "NaN";
const INFINITY: &str = "inf";
const NEG_INFINITY: &str = "-inf";

pub(crate) fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !serializer.is_human_readable() || value.is_finite() {
        return serializer.serialize_f64(*value);
    }
    let text = if value.is_nan() {
        NAN
    } else if value.is_sign_positive() {
        INFINITY
    } else {
        NEG_INFINITY
    };
    serializer.serialize_str(text)
}

pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    if deserializer.is_human_readable() {
        deserializer.deserialize_any(FloatVisitor)
    } else {
        deserializer.deserialize_f64(FloatVisitor)
    }
}

struct FloatVisitor;

impl<'de> Visitor<'de> for FloatVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a number or one of \"{NAN}\", \"{INFINITY}\", \"{NEG_INFINITY}\"")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        match v {
            NAN => Ok(f64::NAN),
            INFINITY => Ok(f64::INFINITY),
            NEG_INFINITY => Ok(f64::NEG_INFINITY),
            other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::value::Value;

    fn reparse(value: &Value) -> Value {
        let json = serde_json::to_string(value).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn finite_floats_stay_numbers() {
        let json = serde_json::to_string(&Value::from(2.5)).unwrap();
        assert_eq!(json, r#"{"kind":"float","value":2.5}"#);
    }

    #[test]
    fn non_finite_floats_are_tagged_strings() {
        let json = serde_json::to_string(&Value::from(f64::NEG_INFINITY)).unwrap();
        assert_eq!(json, r#"{"kind":"float","value":"-inf"}"#);
    }

    #[test]
    fn non_finite_floats_reparse() {
        let Value::Float(nan) = reparse(&Value::from(f64::NAN)) else {
            panic!("expected a float");
        };
        assert!(nan.is_nan());
        assert_eq!(reparse(&Value::from(f64::INFINITY)), Value::from(f64::INFINITY));
        assert_eq!(
            reparse(&Value::from(f64::NEG_INFINITY)),
            Value::from(f64::NEG_INFINITY)
        );
    }

    #[test]
    fn integral_float_reparses_as_float() {
        assert_eq!(reparse(&Value::from(3.0)), Value::from(3.0));
    }

    #[test]
    fn unknown_float_string_is_rejected() {
        let err = serde_json::from_str::<Value>(r#"{"kind":"float","value":"lots"}"#);
        assert!(err.is_err());
    }
}
