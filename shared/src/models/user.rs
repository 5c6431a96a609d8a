//! User Model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{lenient_opt_string, lenient_string};

/// Role value that grants access to management routes
pub const ADMIN_ROLE: &str = "admin";

/// User entity, keyed by email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_string"
    )]
    pub id: Option<String>,
    /// Empty for documents created by an upserting promotion
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    /// `"admin"` or absent
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_string"
    )]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }

    /// Strip fields a registering client must not choose: the storage id and
    /// the role (only the promotion endpoint grants a role).
    pub fn into_registration(mut self) -> Self {
        self.id = None;
        self.role = None;
        self.extra.remove("_id");
        self
    }
}

/// Response of `GET /users/admin/{email}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStatus {
    pub admin: bool,
}
