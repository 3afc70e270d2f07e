//! In-memory implementation of UserRepository

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use dv_core::domain::entities::user::User;
use dv_core::errors::StorageError;
use dv_core::repositories::UserRepository;

/// Minimum stored password length
const PASSWORD_MIN_LENGTH: usize = 6;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    /// Unique index on email
    by_email: HashMap<String, Uuid>,
}

/// User store with a unique email index
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn parse_id(id: &str) -> Result<Uuid, StorageError> {
        Uuid::parse_str(id).map_err(|_| StorageError::cast("id", id))
    }

    /// Reject records that break the stored model, naming every failing field
    fn check_model(user: &User) -> Result<(), StorageError> {
        let mut errors = BTreeMap::new();

        if user.name.trim().is_empty() {
            errors.insert("name".to_string(), "Path `name` is required.".to_string());
        }
        if user.email.trim().is_empty() {
            errors.insert("email".to_string(), "Path `email` is required.".to_string());
        }
        if user.password_hash.is_empty() {
            errors.insert("password".to_string(), "Path `password` is required.".to_string());
        } else if user.password_hash.chars().count() < PASSWORD_MIN_LENGTH {
            errors.insert(
                "password".to_string(),
                format!(
                    "Path `password` is shorter than the minimum allowed length ({}).",
                    PASSWORD_MIN_LENGTH
                ),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(StorageError::FieldValidation { errors })
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StorageError> {
        let id = Self::parse_id(id)?;
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables
            .by_email
            .get(email)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, StorageError> {
        Self::check_model(&user)?;

        let mut tables = self.tables.write().await;
        if tables.by_email.contains_key(&user.email) {
            return Err(StorageError::duplicate("email"));
        }

        tables.by_email.insert(user.email.clone(), user.id);
        tables.users.insert(user.id, user.clone());
        tracing::debug!(user_id = %user.id, "user stored");
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, StorageError> {
        Self::check_model(&user)?;

        let mut tables = self.tables.write().await;
        let previous_email = match tables.users.get(&user.id) {
            Some(existing) => existing.email.clone(),
            None => return Err(StorageError::Backend(format!("user {} does not exist", user.id))),
        };

        if previous_email != user.email {
            if tables.by_email.contains_key(&user.email) {
                return Err(StorageError::duplicate("email"));
            }
            tables.by_email.remove(&previous_email);
            tables.by_email.insert(user.email.clone(), user.id);
        }

        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list(&self, offset: usize, limit: usize) -> Result<Vec<User>, StorageError> {
        let tables = self.tables.read().await;
        let mut users: Vec<&User> = tables.users.values().collect();
        users.sort_by_key(|u| (u.created_at, u.id));
        Ok(users.into_iter().skip(offset).take(limit).cloned().collect())
    }

    async fn count(&self) -> Result<u64, StorageError> {
        Ok(self.tables.read().await.users.len() as u64)
    }
}
