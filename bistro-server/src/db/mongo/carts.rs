//! Cart Repository

use std::time::Duration;

use async_trait::async_trait;
use mongodb::Collection;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};

use shared::models::{CartItem, DeleteAck, InsertAck};

use super::convert::{delete_ack, insert_ack, to_document, to_models};
use super::{bounded, find_docs};
use crate::db::repository::{CartRepository, RepoResult};

#[derive(Clone)]
pub struct MongoCartRepository {
    collection: Collection<Document>,
    timeout: Duration,
}

impl MongoCartRepository {
    pub fn new(collection: Collection<Document>, timeout: Duration) -> Self {
        Self {
            collection,
            timeout,
        }
    }
}

#[async_trait]
impl CartRepository for MongoCartRepository {
    async fn find_by_email(&self, email: &str) -> RepoResult<Vec<CartItem>> {
        let docs = find_docs(&self.collection, doc! { "email": email }, self.timeout).await?;
        to_models(docs)
    }

    async fn insert(&self, item: CartItem) -> RepoResult<InsertAck> {
        let doc = to_document(&item)?;
        let result = bounded(self.timeout, self.collection.insert_one(doc)).await?;
        Ok(insert_ack(result))
    }

    async fn delete(&self, id: ObjectId) -> RepoResult<DeleteAck> {
        let filter = doc! { "_id": id };
        let result = bounded(self.timeout, self.collection.delete_one(filter)).await?;
        Ok(delete_ack(result))
    }
}
