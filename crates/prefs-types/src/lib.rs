//! Foundation types for the preferences layer.
//!
//! The underlying preferences store understands a small, closed set of
//! primitive kinds. This crate defines that set and the conversions between
//! them that the rest of the workspace relies on. Every other `prefs` crate
//! depends on `prefs-types`.
//!
//! # Key Types
//!
//! - [`Value`] -- A single stored primitive (string, number, blob, date, collection)
//! - [`ValueKind`] -- The kind tag of a [`Value`], used in diagnostics
//! - [`Number`] -- The generic numeric view over integer, float and bool primitives

pub mod error;
mod float;
pub mod number;
pub mod value;

pub use error::TypeError;
pub use number::Number;
pub use value::{Dictionary, Value, ValueKind};
