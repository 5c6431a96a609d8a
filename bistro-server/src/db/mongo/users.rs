//! User Repository

use std::time::Duration;

use async_trait::async_trait;
use mongodb::Collection;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};

use shared::models::{ADMIN_ROLE, DeleteAck, InsertAck, UpdateAck, User};

use super::convert::{delete_ack, insert_ack, to_document, to_model, to_models, update_ack};
use super::{bounded, find_docs};
use crate::db::repository::{RepoResult, UserRepository};

#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<Document>,
    timeout: Duration,
}

impl MongoUserRepository {
    pub fn new(collection: Collection<Document>, timeout: Duration) -> Self {
        Self {
            collection,
            timeout,
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_all(&self) -> RepoResult<Vec<User>> {
        to_models(find_docs(&self.collection, doc! {}, self.timeout).await?)
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        bounded(self.timeout, self.collection.find_one(doc! { "email": email }))
            .await?
            .map(to_model::<User>)
            .transpose()
    }

    async fn insert(&self, user: User) -> RepoResult<InsertAck> {
        let doc = to_document(&user)?;
        let result = bounded(self.timeout, self.collection.insert_one(doc)).await?;
        Ok(insert_ack(result))
    }

    async fn set_admin_role(&self, id: ObjectId) -> RepoResult<UpdateAck> {
        let promote = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": { "role": ADMIN_ROLE } })
            .upsert(true);
        let result = bounded(self.timeout, promote).await?;
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
