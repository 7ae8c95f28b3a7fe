//! Data models for extracted soundtrack credits.
//!
//! Field names in the JSON form (`name`, `Artists`, `imdbID`, `image`)
//! are kept stable so existing consumers of the output keep working.

pub mod artist;
pub mod soundtrack;

// Re-exports for convenience
pub use artist::{Artist, Role};
pub use soundtrack::Soundtrack;

use serde::{Deserialize, Deserializer, Serializer};

/// Serialize a missing optional string as `""`.
fn none_as_empty<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_deref().unwrap_or(""))
}

/// Read `""` back as `None`.
fn empty_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
