//! Review Model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient_opt_string;

/// Customer review; the schema is owned by whoever writes the collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_string"
    )]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}
