//! Menu Repository

use std::time::Duration;

use async_trait::async_trait;
use mongodb::Collection;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};

use shared::models::{DeleteAck, InsertAck, MenuItem, MenuItemUpdate, UpdateAck};

use super::convert::{delete_ack, insert_ack, to_document, to_model, to_models, update_ack};
use super::{bounded, find_docs};
use crate::db::repository::{MenuRepository, RepoResult};

#[derive(Clone)]
pub struct MongoMenuRepository {
    collection: Collection<Document>,
    timeout: Duration,
}

impl MongoMenuRepository {
    pub fn new(collection: Collection<Document>, timeout: Duration) -> Self {
        Self {
            collection,
            timeout,
        }
    }
}

#[async_trait]
impl MenuRepository for MongoMenuRepository {
    async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        to_models(find_docs(&self.collection, doc! {}, self.timeout).await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<MenuItem>> {
        bounded(self.timeout, self.collection.find_one(doc! { "_id": id }))
            .await?
            .map(to_model::<MenuItem>)
            .transpose()
    }

    async fn insert(&self, item: MenuItem) -> RepoResult<InsertAck> {
        let doc = to_document(&item)?;
        let result = bounded(self.timeout, self.collection.insert_one(doc)).await?;
        Ok(insert_ack(result))
    }

    async fn update(&self, id: ObjectId, update: MenuItemUpdate) -> RepoResult<UpdateAck> {
        // Omitted fields are written as null
        let set = doc! {
            "name": update.name,
            "category": update.category,
            "price": update.price,
            "recipe": update.recipe,
            "image": update.image,
        };
        let write = self.collection.update_one(doc! { "_id": id }, doc! { "$set": set });
        let result = bounded(self.timeout, write).await?;
        Ok(update_ack(result))
    }

    async fn delete(&self, id: ObjectId) -> RepoResult<DeleteAck> {
        let filter = doc! { "_id": id };
        let result = bounded(self.timeout, self.collection.delete_one(filter)).await?;
        Ok(delete_ack(result))
    }

    async fn estimated_count(&self) -> RepoResult<u64> {
        bounded(self.timeout, self.collection.estimated_document_count()).await
    }
}
