//! Menu Item Model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{lenient_opt_string, lenient_string};

/// Menu item entity
///
/// `price` is kept as stored: items written before prices were numeric hold
/// strings there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_string"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default)]
    pub price: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    pub recipe: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Update payload for `PATCH /menu/{id}`
///
/// All five fields are written; an omitted field is stored as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub recipe: Option<String>,
    pub image: Option<String>,
}
