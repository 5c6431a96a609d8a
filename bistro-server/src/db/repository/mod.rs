//! Repository Module
//!
//! One trait per collection. Handlers only see these traits; the MongoDB
//! gateway and the in-memory store both implement all four.

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::error::{ErrorKind, WriteFailure};
use shared::models::{
    CartItem, DeleteAck, InsertAck, MenuItem, MenuItemUpdate, Review, UpdateAck, User,
};
use shared::AppError;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    /// A unique index rejected the write
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

/// Server error code for a unique index violation
const DUPLICATE_KEY: i32 = 11000;

impl From<mongodb::error::Error> for RepoError {
    fn from(err: mongodb::error::Error) -> Self {
        let duplicate = matches!(
            err.kind.as_ref(),
            ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY
        );
        if duplicate {
            RepoError::Duplicate(err.to_string())
        } else {
            RepoError::Database(err.to_string())
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        // The cause is logged here, never sent to the client
        tracing::error!(error = %err, "Repository operation failed");
        AppError::database()
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// `user` collection
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> RepoResult<Vec<User>>;

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Fails with [`RepoError::Duplicate`] when `email` is already registered
    async fn insert(&self, user: User) -> RepoResult<InsertAck>;

    /// Set `role` to admin, creating a bare document when no user has `id`
    async fn set_admin_role(&self, id: ObjectId) -> RepoResult<UpdateAck>;

    async fn delete(&self, id: ObjectId) -> RepoResult<DeleteAck>;

    /// Count from collection metadata, not a scan
    async fn estimated_count(&self) -> RepoResult<u64>;
}

/// `menu` collection
#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn find_all(&self) -> RepoResult<Vec<MenuItem>>;

    async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<MenuItem>>;

    async fn insert(&self, item: MenuItem) -> RepoResult<InsertAck>;

    /// Overwrite the five editable fields; never inserts
    async fn update(&self, id: ObjectId, update: MenuItemUpdate) -> RepoResult<UpdateAck>;

    async fn delete(&self, id: ObjectId) -> RepoResult<DeleteAck>;

    async fn estimated_count(&self) -> RepoResult<u64>;
}

/// `reviews` collection (read-only through the API)
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_all(&self) -> RepoResult<Vec<Review>>;
}

/// `carts` collection
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> RepoResult<Vec<CartItem>>;

    async fn insert(&self, item: CartItem) -> RepoResult<InsertAck>;

    async fn delete(&self, id: ObjectId) -> RepoResult<DeleteAck>;
}
