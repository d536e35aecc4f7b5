use thiserror::Error;

use crate::value::ValueKind;

/// Errors produced by primitive value conversions.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TypeError {
    #[error("value of kind {0} is not numeric")]
    NotNumeric(ValueKind),
}
