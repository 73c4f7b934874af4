//! Serde helpers for Redash's nullable columns.
//!
//! Redash serializes unset database columns as `null` even where the field is
//! a string, number, list or map. Records decode those to the type's default.

use serde::{Deserialize, Deserializer};

/// Decode `null` (or a missing field, together with `#[serde(default)]`) as `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
