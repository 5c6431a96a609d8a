//! MongoDB gateway
//!
//! One client per process, shared by the four collection repositories.
//! `connect` only returns once the deployment has answered a ping. Every
//! repository call is bounded by `DB_SOCKET_TIMEOUT_MS`.

mod carts;
mod convert;
mod menu;
mod reviews;
mod users;

pub use carts::MongoCartRepository;
pub use menu::MongoMenuRepository;
pub use reviews::MongoReviewRepository;
pub use users::MongoUserRepository;

use std::future::IntoFuture;
use std::time::Duration;

use futures::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::options::{ClientOptions, IndexOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection, Database, IndexModel};

use crate::config::DatabaseConfig;
use crate::db::repository::{RepoError, RepoResult};

pub const USER_COLLECTION: &str = "user";
pub const MENU_COLLECTION: &str = "menu";
pub const REVIEW_COLLECTION: &str = "reviews";
pub const CART_COLLECTION: &str = "carts";

#[derive(Clone)]
pub struct MongoGateway {
    database: Database,
    op_timeout: Duration,
}

impl MongoGateway {
    /// Build the client (stable API v1, strict) and verify it with a ping
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, mongodb::error::Error> {
        let mut options = ClientOptions::parse(config.connection_uri()).await?;
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );
        options.connect_timeout = Some(config.connect_timeout);
        options.server_selection_timeout = Some(config.socket_timeout);

        let client = Client::with_options(options)?;
        let database = client.database(&config.name);
        database.run_command(doc! { "ping": 1 }).await?;

        tracing::info!(database = %config.name, "Pinged deployment, MongoDB connection is up");
        let gateway = Self {
            database,
            op_timeout: config.socket_timeout,
        };
        gateway.ensure_indexes().await;
        Ok(gateway)
    }

    /// Existing duplicates make index creation fail; the server still starts
    async fn ensure_indexes(&self) {
        let users = self.database.collection::<Document>(USER_COLLECTION);
        match bounded(self.op_timeout, users.create_index(email_index())).await {
            Ok(_) => tracing::info!(collection = USER_COLLECTION, "Unique email index ready"),
            Err(e) => tracing::warn!(
                collection = USER_COLLECTION,
                error = %e,
                "Could not create the unique email index"
            ),
        }
    }

    pub fn users(&self) -> MongoUserRepository {
        MongoUserRepository::new(self.database.collection(USER_COLLECTION), self.op_timeout)
    }

    pub fn menu(&self) -> MongoMenuRepository {
        MongoMenuRepository::new(self.database.collection(MENU_COLLECTION), self.op_timeout)
    }

    pub fn reviews(&self) -> MongoReviewRepository {
        MongoReviewRepository::new(self.database.collection(REVIEW_COLLECTION), self.op_timeout)
    }

    pub fn carts(&self) -> MongoCartRepository {
        MongoCartRepository::new(self.database.collection(CART_COLLECTION), self.op_timeout)
    }
}

/// Unique `email` over users; documents without a string email (upserted
/// promotions) are left out of the index
fn email_index() -> IndexModel {
    let options = IndexOptions::builder()
        .name("email_unique".to_string())
        .unique(true)
        .partial_filter_expression(doc! { "email": { "$type": "string" } })
        .build();
    IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(options)
        .build()
}

/// Run one store operation, giving up once `limit` has passed
async fn bounded<T, F>(limit: Duration, op: F) -> RepoResult<T>
where
    F: IntoFuture<Output = Result<T, mongodb::error::Error>>,
{
    match tokio::time::timeout(limit, op.into_future()).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(RepoError::Timeout(limit)),
    }
}

/// Every document matching `filter`, collected under one deadline
async fn find_docs(
    collection: &Collection<Document>,
    filter: Document,
    limit: Duration,
) -> RepoResult<Vec<Document>> {
    bounded(limit, async {
        collection.find(filter).await?.try_collect::<Vec<_>>().await
    })
    .await
}
