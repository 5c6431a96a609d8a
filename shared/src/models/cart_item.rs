//! Cart Item Model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{lenient_opt_string, lenient_string};

/// Cart entry owned by the user with `email`
///
/// `menu_id` points at a menu item but is not checked against the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_string"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(
        rename = "menuId",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_string"
    )]
    pub menu_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let item: CartItem = serde_json::from_str(
            r#"{"email":"a@x.com","menuId":"642c155b2c4774f05c36eeaa","name":"Soup","price":9.5}"#,
        )
        .unwrap();
        assert_eq!(item.menu_id.as_deref(), Some("642c155b2c4774f05c36eeaa"));
        assert_eq!(item.extra.get("price").unwrap(), 9.5);

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["menuId"], "642c155b2c4774f05c36eeaa");
        assert!(json.get("_id").is_none());
    }

    #[test]
    fn test_null_email_and_numeric_menu_id() {
        let item: CartItem = serde_json::from_str(r#"{"email":null,"menuId":7}"#).unwrap();
        assert!(item.email.is_empty());
        assert_eq!(item.menu_id.as_deref(), Some("7"));
    }
}
