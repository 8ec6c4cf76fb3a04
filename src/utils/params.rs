//! Helpers for binding query-string parameters

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, de};

/// Deserialize an optional value, treating an empty string as absent.
///
/// `?ageGoe=` binds as `None` instead of failing to parse `""`.
pub fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref() {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => FromStr::from_str(s).map_err(de::Error::custom).map(Some),
    }
}
