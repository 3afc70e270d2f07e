//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::StorageError;

use super::trait_::UserRepository;

/// Mock user repository for testing
#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user directly, bypassing uniqueness checks
    pub async fn seed(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    fn parse_id(id: &str) -> Result<Uuid, StorageError> {
        Uuid::parse_str(id).map_err(|_| StorageError::cast("id", id))
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StorageError> {
        let id = Self::parse_id(id)?;
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: User) -> Result<User, StorageError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(StorageError::duplicate("email"));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, StorageError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(StorageError::Backend(format!("user {} does not exist", user.id)));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list(&self, offset: usize, limit: usize) -> Result<Vec<User>, StorageError> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|u| (u.created_at, u.id));
        Ok(all.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self) -> Result<u64, StorageError> {
        Ok(self.users.read().await.len() as u64)
    }
}
