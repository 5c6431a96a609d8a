//! In-memory store
//!
//! Implements every repository trait over plain vectors. Used by the test
//! suite and by `DATABASE_BACKEND=memory` for local runs without a cluster.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use tokio::sync::RwLock;

use shared::models::{
    ADMIN_ROLE, CartItem, DeleteAck, InsertAck, MenuItem, MenuItemUpdate, Review, UpdateAck, User,
};

use super::repository::{
    CartRepository, MenuRepository, RepoError, RepoResult, ReviewRepository, UserRepository,
};

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    menu: Vec<MenuItem>,
    reviews: Vec<Review>,
    carts: Vec<CartItem>,
}

/// Cloneable handle; clones share the same collections
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
    operations: Arc<AtomicU64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of repository calls served so far
    pub fn operations(&self) -> u64 {
        self.operations.load(Ordering::Relaxed)
    }

    fn track(&self) {
        self.operations.fetch_add(1, Ordering::Relaxed);
    }

    /// Load reviews directly; the API has no write route for them
    pub async fn seed_reviews(&self, reviews: impl IntoIterator<Item = Review>) {
        let mut guard = self.inner.write().await;
        for mut review in reviews {
            review.id.get_or_insert_with(new_id);
            guard.reviews.push(review);
        }
    }
}

fn new_id() -> String {
    ObjectId::new().to_hex()
}

fn matches_id(stored: &Option<String>, id: &ObjectId) -> bool {
    stored.as_deref() == Some(id.to_hex().as_str())
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_all(&self) -> RepoResult<Vec<User>> {
        self.track();
        Ok(self.inner.read().await.users.clone())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.track();
        let guard = self.inner.read().await;
        Ok(guard.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, mut user: User) -> RepoResult<InsertAck> {
        self.track();
        let mut guard = self.inner.write().await;
        if !user.email.is_empty() && guard.users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Duplicate(format!("email {}", user.email)));
        }
        let id = new_id();
        user.id = Some(id.clone());
        guard.users.push(user);
        Ok(InsertAck::new(id))
    }

    async fn set_admin_role(&self, id: ObjectId) -> RepoResult<UpdateAck> {
        self.track();
        let mut guard = self.inner.write().await;
        if let Some(user) = guard.users.iter_mut().find(|u| matches_id(&u.id, &id)) {
            let modified = !user.is_admin();
            user.role = Some(ADMIN_ROLE.to_string());
            return Ok(UpdateAck {
                acknowledged: true,
                matched_count: 1,
                modified_count: u64::from(modified),
                ..Default::default()
            });
        }

        // Upsert: the new document carries only the id and the role
        guard.users.push(User {
            id: Some(id.to_hex()),
            email: String::new(),
            role: Some(ADMIN_ROLE.to_string()),
            extra: Default::default(),
        });
        Ok(UpdateAck {
            acknowledged: true,
            upserted_count: 1,
            upserted_id: Some(id.to_hex()),
            ..Default::default()
        })
    }

    async fn delete(&self, id: ObjectId) -> RepoResult<DeleteAck> {
        self.track();
        let mut guard = self.inner.write().await;
        let before = guard.users.len();
        if let Some(pos) = guard.users.iter().position(|u| matches_id(&u.id, &id)) {
            guard.users.remove(pos);
        }
        Ok(DeleteAck::new((before - guard.users.len()) as u64))
    }

    async fn estimated_count(&self) -> RepoResult<u64> {
        self.track();
        Ok(self.inner.read().await.users.len() as u64)
    }
}

#[async_trait]
impl MenuRepository for MemoryStore {
    async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        self.track();
        Ok(self.inner.read().await.menu.clone())
    }

    async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<MenuItem>> {
        self.track();
        let guard = self.inner.read().await;
        Ok(guard.menu.iter().find(|m| matches_id(&m.id, &id)).cloned())
    }

    async fn insert(&self, mut item: MenuItem) -> RepoResult<InsertAck> {
        self.track();
        let id = new_id();
        item.id = Some(id.clone());
        self.inner.write().await.menu.push(item);
        Ok(InsertAck::new(id))
    }

    async fn update(&self, id: ObjectId, update: MenuItemUpdate) -> RepoResult<UpdateAck> {
        self.track();
        let mut guard = self.inner.write().await;
        let Some(item) = guard.menu.iter_mut().find(|m| matches_id(&m.id, &id)) else {
            return Ok(UpdateAck {
                acknowledged: true,
                ..Default::default()
            });
        };

        let before = item.clone();
        item.name = update.name.unwrap_or_default();
        item.category = update.category.unwrap_or_default();
        item.price = update.price.map(Value::from).unwrap_or(Value::Null);
        item.recipe = update.recipe.unwrap_or_default();
        item.image = update.image.unwrap_or_default();
        let modified = *item != before;

        Ok(UpdateAck {
            acknowledged: true,
            matched_count: 1,
            modified_count: u64::from(modified),
            ..Default::default()
        })
    }

    async fn delete(&self, id: ObjectId) -> RepoResult<DeleteAck> {
        self.track();
        let mut guard = self.inner.write().await;
        let before = guard.menu.len();
        if let Some(pos) = guard.menu.iter().position(|m| matches_id(&m.id, &id)) {
            guard.menu.remove(pos);
        }
        Ok(DeleteAck::new((before - guard.menu.len()) as u64))
    }

    async fn estimated_count(&self) -> RepoResult<u64> {
        self.track();
        Ok(self.inner.read().await.menu.len() as u64)
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn find_all(&self) -> RepoResult<Vec<Review>> {
        self.track();
        Ok(self.inner.read().await.reviews.clone())
    }
}

#[async_trait]
impl CartRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> RepoResult<Vec<CartItem>> {
        self.track();
        let guard = self.inner.read().await;
        Ok(guard
            .carts
            .iter()
            .filter(|c| c.email == email)
            .cloned()
            .collect())
    }

    async fn insert(&self, mut item: CartItem) -> RepoResult<InsertAck> {
        self.track();
        let id = new_id();
        item.id = Some(id.clone());
        self.inner.write().await.carts.push(item);
        Ok(InsertAck::new(id))
    }

    async fn delete(&self, id: ObjectId) -> RepoResult<DeleteAck> {
        self.track();
        let mut guard = self.inner.write().await;
        let before = guard.carts.len();
        if let Some(pos) = guard.carts.iter().position(|c| matches_id(&c.id, &id)) {
            guard.carts.remove(pos);
        }
        Ok(DeleteAck::new((before - guard.carts.len()) as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User {
            id: None,
            email: email.into(),
            role: None,
            extra: Default::default(),
        }
    }

    fn cart(email: &str) -> CartItem {
        CartItem {
            id: None,
            email: email.into(),
            menu_id: Some("642c155b2c4774f05c36eeaa".into()),
            extra: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_promote_existing_user_then_again() {
        let store = MemoryStore::new();
        let ack = UserRepository::insert(&store, user("a@x.com")).await.unwrap();
        let id = ObjectId::parse_str(&ack.inserted_id).unwrap();

        let first = store.set_admin_role(id).await.unwrap();
        assert_eq!((first.matched_count, first.modified_count), (1, 1));

        let second = store.set_admin_role(id).await.unwrap();
        assert_eq!((second.matched_count, second.modified_count), (1, 0));

        let found = UserRepository::find_by_email(&store, "a@x.com")
            .await
            .unwrap()
            .unwrap();
        assert!(found.is_admin());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        UserRepository::insert(&store, user("a@x.com")).await.unwrap();
        let err = UserRepository::insert(&store, user("a@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        let users = UserRepository::find_all(&store).await.unwrap();
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn test_promote_unknown_id_upserts() {
        let store = MemoryStore::new();
        let id = ObjectId::new();
        let ack = store.set_admin_role(id).await.unwrap();
        assert_eq!(ack.matched_count, 0);
        assert_eq!(ack.upserted_count, 1);
        assert_eq!(ack.upserted_id, Some(id.to_hex()));

        let users = UserRepository::find_all(&store).await.unwrap();
        assert_eq!(users.len(), 1);
        assert!(users[0].email.is_empty());
    }

    #[tokio::test]
    async fn test_menu_update_overwrites_all_fields() {
        let store = MemoryStore::new();
        let item: MenuItem = serde_json::from_value(serde_json::json!({
            "name": "Soup", "category": "soup", "price": 9.5, "recipe": "hot", "image": "s.png"
        }))
        .unwrap();
        let ack = MenuRepository::insert(&store, item).await.unwrap();
        let id = ObjectId::parse_str(&ack.inserted_id).unwrap();

        let update = MenuItemUpdate {
            name: Some("Stew".into()),
            ..Default::default()
        };
        let result = store.update(id, update).await.unwrap();
        assert_eq!(result.modified_count, 1);

        let stored = MenuRepository::find_by_id(&store, id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Stew");
        assert_eq!(stored.recipe, "");
        assert!(stored.price.is_null());
    }

    #[tokio::test]
    async fn test_menu_update_missing_never_inserts() {
        let store = MemoryStore::new();
        let ack = store
            .update(ObjectId::new(), MenuItemUpdate::default())
            .await
            .unwrap();
        assert_eq!(ack.matched_count, 0);
        assert_eq!(ack.upserted_count, 0);
        assert_eq!(MenuRepository::estimated_count(&store).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_cart_filter_and_delete() {
        let store = MemoryStore::new();
        let ack = CartRepository::insert(&store, cart("a@x.com")).await.unwrap();
        CartRepository::insert(&store, cart("b@x.com")).await.unwrap();

        let own = CartRepository::find_by_email(&store, "a@x.com").await.unwrap();
        assert_eq!(own.len(), 1);
        let none = CartRepository::find_by_email(&store, "nobody@x.com")
            .await
            .unwrap();
        assert!(none.is_empty());

        let id = ObjectId::parse_str(&ack.inserted_id).unwrap();
        let first = CartRepository::delete(&store, id).await.unwrap();
        assert_eq!(first.deleted_count, 1);
        let second = CartRepository::delete(&store, id).await.unwrap();
        assert_eq!(second.deleted_count, 0);
    }

    #[tokio::test]
    async fn test_operations_counter() {
        let store = MemoryStore::new();
        assert_eq!(store.operations(), 0);
        ReviewRepository::find_all(&store).await.unwrap();
        assert_eq!(store.operations(), 1);
    }
}
