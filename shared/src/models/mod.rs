//! Data models
//!
//! Shared between the server and its clients (via API). Stored documents
//! carry their storage id as `_id`, rendered as a 24-hex string. Fields the
//! server does not model are kept in a flattened `extra` map so documents
//! round-trip unchanged.

pub mod ack;
pub mod cart_item;
pub mod menu_item;
pub mod review;
pub mod stats;
pub mod user;

// Re-exports
pub use ack::*;
pub use cart_item::*;
pub use menu_item::*;
pub use review::*;
pub use stats::*;
pub use user::*;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read any JSON value as text: `null` is empty, strings are taken as-is and
/// other scalars keep their JSON rendering.
///
/// Stored documents were written by clients without a schema, so a modelled
/// field may hold the wrong type. Reading must not fail on them.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

/// Like [`lenient_string`], keeping `null` apart as `None`
pub(crate) fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}
