//! Review Repository

use std::time::Duration;

use async_trait::async_trait;
use mongodb::Collection;
use mongodb::bson::{Document, doc};

use shared::models::Review;

use super::convert::to_models;
use super::find_docs;
use crate::db::repository::{RepoResult, ReviewRepository};

#[derive(Clone)]
pub struct MongoReviewRepository {
    collection: Collection<Document>,
    timeout: Duration,
}

impl MongoReviewRepository {
    pub fn new(collection: Collection<Document>, timeout: Duration) -> Self {
        Self {
            collection,
            timeout,
        }
    }
}

#[async_trait]
impl ReviewRepository for MongoReviewRepository {
    async fn find_all(&self) -> RepoResult<Vec<Review>> {
        to_models(find_docs(&self.collection, doc! {}, self.timeout).await?)
    }
}
