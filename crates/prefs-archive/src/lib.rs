//! Object archiving for the preferences layer.
//!
//! The preferences store holds only primitive kinds. Arbitrary caller types
//! reach it by being archived into an opaque binary blob and unarchived on
//! the way back out. This crate defines that boundary as a strategy trait so
//! the typed layer stays independent of any particular binary format.
//!
//! # Key Types
//!
//! - [`Archivable`] -- A type that can be archived, identified by a stable tag
//! - [`Archiver`] -- The encode/decode strategy
//! - [`BincodeArchiver`] -- Compact binary archives (the default)
//! - [`JsonArchiver`] -- Human-readable archives
//!
//! Every archive carries the tag of the type it was produced from. Decoding
//! into a type with a different tag fails with
//! [`ArchiveError::TypeMismatch`], even when the payload would happen to
//! parse.

pub mod archivable;
pub mod archiver;
pub mod binary;
pub mod error;
mod finite;
pub mod json;

pub use archivable::Archivable;
pub use archiver::Archiver;
pub use binary::BincodeArchiver;
pub use error::{ArchiveError, ArchiveResult};
pub use json::JsonArchiver;
