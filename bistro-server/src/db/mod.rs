//! Database Module
//!
//! Repository traits, their MongoDB and in-memory implementations, and
//! storage id parsing.

pub mod memory;
pub mod mongo;
pub mod object_id;
pub mod repository;

pub use memory::MemoryStore;
pub use mongo::MongoGateway;
pub use object_id::parse_object_id;
pub use repository::{
    CartRepository, MenuRepository, RepoError, RepoResult, ReviewRepository, UserRepository,
};

use std::sync::Arc;

/// The four collection handles the HTTP layer works with
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub menu: Arc<dyn MenuRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub carts: Arc<dyn CartRepository>,
}

impl Repositories {
    pub fn from_mongo(gateway: &MongoGateway) -> Self {
        Self {
            users: Arc::new(gateway.users()),
            menu: Arc::new(gateway.menu()),
            reviews: Arc::new(gateway.reviews()),
            carts: Arc::new(gateway.carts()),
        }
    }

    pub fn from_memory(store: MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            menu: Arc::new(store.clone()),
            reviews: Arc::new(store.clone()),
            carts: Arc::new(store),
        }
    }
}
