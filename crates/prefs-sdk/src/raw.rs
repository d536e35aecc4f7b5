use crate::coerce::Storable;

/// A type with a stable scalar projection, typically a fieldless enum.
///
/// Archived through its raw value, which is stored with the same coercion
/// rules as any other value of type [`Raw`](Self::Raw).
///
/// ```
/// use prefs_sdk::RawRepresentable;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Theme { Light, Dark }
///
/// impl RawRepresentable for Theme {
///     type Raw = String;
///
///     fn raw_value(&self) -> String {
///         match self {
///             Theme::Light => "light".into(),
///             Theme::Dark => "dark".into(),
///         }
///     }
///
///     fn from_raw_value(raw: String) -> Option<Self> {
///         match raw.as_str() {
///             "light" => Some(Theme::Light),
///             "dark" => Some(Theme::Dark),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait RawRepresentable: Sized {
    type Raw: Storable;

    fn raw_value(&self) -> Self::Raw;

    /// Reconstructs a value, or `None` if `raw` is outside the valid domain.
    fn from_raw_value(raw: Self::Raw) -> Option<Self>;
}
