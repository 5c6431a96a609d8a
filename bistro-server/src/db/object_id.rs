//! Storage identifier parsing
//!
//! Path ids are validated before any repository call so a malformed id
//! never reaches the database.

use mongodb::bson::oid::ObjectId;
use shared::{AppError, AppResult};

/// Parse a 24-hex-digit id; `resource` names it in the error message
pub fn parse_object_id(raw: &str, resource: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| AppError::invalid_id(resource).with_detail("id", raw))
}
