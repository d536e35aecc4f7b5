use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A value type that can be archived into an opaque blob.
///
/// The tag names the type inside the archive. It must be stable across
/// program versions and unique among the types stored under one store;
/// it is what lets an unarchive reject a blob written for another type.
pub trait Archivable: Serialize + DeserializeOwned {
    fn archive_tag() -> Cow<'static, str>;
}

impl<T: Archivable> Archivable for Vec<T> {
    fn archive_tag() -> Cow<'static, str> {
        Cow::Owned(format!("[{}]", T::archive_tag()))
    }
}

/// Implements [`Archivable`] for a type with a fixed tag.
///
/// ```
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Color { r: u8, g: u8, b: u8 }
///
/// prefs_archive::archivable!(Color => "Color");
/// ```
#[macro_export]
macro_rules! archivable {
    ($($ty:ty => $tag:expr),+ $(,)?) => {
        $(
            impl $crate::Archivable for $ty {
                fn archive_tag() -> ::std::borrow::Cow<'static, str> {
                    ::std::borrow::Cow::Borrowed($tag)
                }
            }
        )+
    };
}

archivable!(
    String => "String",
    i64 => "i64",
    f64 => "f64",
    bool => "bool",
);
