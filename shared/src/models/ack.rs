//! Write acknowledgments
//!
//! Write routes answer with the acknowledgment of the single storage
//! operation they performed, in the document store's camelCase shape.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl InsertAck {
    pub fn new(inserted_id: impl Into<String>) -> Self {
        Self {
            acknowledged: true,
            inserted_id: inserted_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteAck {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

/// Message carried by the already-exists sentinel
pub const USER_ALREADY_CREATED: &str = "User already created";

/// Response of `POST /user`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserCreated {
    Inserted(InsertAck),
    /// Idempotent no-op: a user with the email already exists
    AlreadyExists {
        message: String,
        #[serde(rename = "insertedId")]
        inserted_id: Option<String>,
    },
}

impl UserCreated {
    pub fn already_exists() -> Self {
        Self::AlreadyExists {
            message: USER_ALREADY_CREATED.to_string(),
            inserted_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_ack_shape() {
        let json = serde_json::to_value(InsertAck::new("65f1c0ffee0000000000abcd")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"acknowledged": true, "insertedId": "65f1c0ffee0000000000abcd"})
        );
    }

    #[test]
    fn test_sentinel_shape() {
        let json = serde_json::to_value(UserCreated::already_exists()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"message": "User already created", "insertedId": null})
        );
    }

    #[test]
    fn test_update_ack_shape() {
        let ack = UpdateAck {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: Some("65f1c0ffee0000000000abcd".into()),
        };
        let json = serde_json::to_value(ack).unwrap();
        assert_eq!(json["upsertedCount"], 1);
        assert_eq!(json["matchedCount"], 0);
        assert_eq!(json["upsertedId"], "65f1c0ffee0000000000abcd");
    }

    #[test]
    fn test_delete_ack_shape() {
        let json = serde_json::to_value(DeleteAck::new(1)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"acknowledged": true, "deletedCount": 1})
        );
    }
}
