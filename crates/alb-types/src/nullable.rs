//! Serde helper for fields with an explicit null convention.
//!
//! Use on `Option<Option<T>>` together with
//! `#[serde(default, skip_serializing_if = "Option::is_none", with = "crate::nullable")]`:
//!
//! | wire            | Rust            |
//! |-----------------|-----------------|
//! | key absent      | `None`          |
//! | `null`          | `Some(None)`    |
//! | value           | `Some(Some(v))` |
//!
//! Optional lists have no such distinction: [`list`] reads `null` as the
//! empty list, matching the codec's treatment of `null` as absent.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(Some(inner)) => inner.serialize(serializer),
        _ => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Use with `#[serde(default, deserialize_with = "crate::nullable::list")]` on `Vec<T>`.
pub fn list<'de, T, D>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
