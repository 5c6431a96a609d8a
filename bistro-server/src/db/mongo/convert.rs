//! BSON <-> model conversion
//!
//! Models speak plain JSON: ids are 24-hex strings. Documents are read
//! through relaxed extended JSON with `{"$oid": ..}` wrappers collapsed,
//! and written without `_id` so the store assigns one.

use mongodb::bson::{self, Bson, Document};
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use shared::models::{DeleteAck, InsertAck, UpdateAck};

use crate::db::repository::{RepoError, RepoResult};

pub fn to_model<T: DeserializeOwned>(doc: Document) -> RepoResult<T> {
    let json = collapse_object_ids(Bson::Document(doc).into_relaxed_extjson());
    serde_json::from_value(json).map_err(|e| RepoError::InvalidDocument(e.to_string()))
}

pub fn to_models<T: DeserializeOwned>(docs: Vec<Document>) -> RepoResult<Vec<T>> {
    docs.into_iter().map(to_model).collect()
}

pub fn to_document<T: Serialize>(model: &T) -> RepoResult<Document> {
    let json = serde_json::to_value(model).map_err(|e| RepoError::InvalidDocument(e.to_string()))?;
    match bson::to_bson(&json).map_err(|e| RepoError::InvalidDocument(e.to_string()))? {
        Bson::Document(mut doc) => {
            doc.remove("_id");
            Ok(doc)
        }
        other => Err(RepoError::InvalidDocument(format!(
            "expected an object, got {:?}",
            other.element_type()
        ))),
    }
}

fn collapse_object_ids(value: Value) -> Value {
    match value {
        Value::Object(mut map) => {
            if map.len() == 1
                && matches!(map.get("$oid"), Some(Value::String(_)))
                && let Some(oid) = map.remove("$oid")
            {
                return oid;
            }
            Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, collapse_object_ids(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(collapse_object_ids).collect()),
        other => other,
    }
}

/// Render a stored id the way models carry it
pub fn id_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn insert_ack(result: InsertOneResult) -> InsertAck {
    InsertAck::new(id_string(&result.inserted_id))
}

pub fn update_ack(result: UpdateResult) -> UpdateAck {
    UpdateAck {
        acknowledged: true,
        matched_count: result.matched_count,
        modified_count: result.modified_count,
        upserted_count: u64::from(result.upserted_id.is_some()),
        upserted_id: result.upserted_id.as_ref().map(id_string),
    }
}

pub fn delete_ack(result: DeleteResult) -> DeleteAck {
    DeleteAck::new(result.deleted_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;
    use mongodb::bson::oid::ObjectId;
    use shared::models::{CartItem, MenuItem, User};

    #[test]
    fn test_object_id_read_as_hex() {
        let oid = ObjectId::parse_str("65f1c0ffee0000000000abcd").unwrap();
        let doc = doc! { "_id": oid, "name": "Soup", "category": "soup", "price": 12 };
        let item: MenuItem = to_model(doc).unwrap();
        assert_eq!(item.id.as_deref(), Some("65f1c0ffee0000000000abcd"));
        assert_eq!(item.price, 12);
    }

    #[test]
    fn test_mixed_shape_collection_reads_whole() {
        let menu = vec![
            doc! { "_id": ObjectId::new(), "name": "Soup", "price": 9.5 },
            doc! { "_id": ObjectId::new(), "name": "Tea", "price": "12.5" },
            doc! { "_id": ObjectId::new(), "name": null, "price": null },
            doc! { "_id": 42, "name": 7, "category": ["hot"] },
        ];
        let items = to_models::<MenuItem>(menu).unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].price, 9.5);
        assert_eq!(items[1].price, "12.5");
        assert!(items[2].name.is_empty());
        assert_eq!(items[3].id.as_deref(), Some("42"));

        let users = vec![
            doc! { "email": null },
            doc! { "_id": ObjectId::new(), "role": "admin" },
            doc! { "email": "a@x.com", "role": null },
        ];
        let users = to_models::<User>(users).unwrap();
        assert_eq!(users.len(), 3);
        assert!(users[0].email.is_empty());
        assert!(users[1].is_admin());

        let carts = vec![doc! { "email": null, "menuId": 3 }];
        let carts = to_models::<CartItem>(carts).unwrap();
        assert_eq!(carts[0].menu_id.as_deref(), Some("3"));
    }

    #[test]
    fn test_nested_object_id_collapsed() {
        let oid = ObjectId::parse_str("642c155b2c4774f05c36eeaa").unwrap();
        let doc = doc! { "email": "a@x.com", "menuId": oid, "tags": [oid] };
        let item: CartItem = to_model(doc).unwrap();
        assert_eq!(item.menu_id.as_deref(), Some("642c155b2c4774f05c36eeaa"));
        assert_eq!(
            item.extra.get("tags").unwrap(),
            &serde_json::json!(["642c155b2c4774f05c36eeaa"])
        );
    }

    #[test]
    fn test_document_drops_id() {
        let item: CartItem = serde_json::from_value(serde_json::json!({
            "_id": "65f1c0ffee0000000000abcd", "email": "a@x.com", "quantity": 2
        }))
        .unwrap();
        let doc = to_document(&item).unwrap();
        assert!(!doc.contains_key("_id"));
        assert_eq!(doc.get_str("email").unwrap(), "a@x.com");
        assert!(doc.contains_key("quantity"));
    }

    #[test]
    fn test_id_string() {
        let oid = ObjectId::new();
        assert_eq!(id_string(&Bson::ObjectId(oid)), oid.to_hex());
        assert_eq!(id_string(&Bson::String("abc".into())), "abc");
    }
}
