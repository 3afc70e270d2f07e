//! User repository trait defining the interface for account persistence.
//!
//! Implementations report failures as [`StorageError`] kinds so the HTTP layer
//! can translate them: a malformed id is a `Cast`, a taken email is a
//! `Duplicate`, and a record breaking the stored model is `FieldValidation`.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::StorageError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that id
    /// * `Err(StorageError::Cast)` - `id` is not a valid identifier
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StorageError>;

    /// Find a user by normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError>;

    /// Persist a new user
    ///
    /// Fails with `Duplicate { fields: ["email"] }` when the email is taken and
    /// with `FieldValidation` listing every field that breaks the stored model.
    async fn create(&self, user: User) -> Result<User, StorageError>;

    /// Replace an existing user
    async fn update(&self, user: User) -> Result<User, StorageError>;

    /// A page of users ordered by creation time
    async fn list(&self, offset: usize, limit: usize) -> Result<Vec<User>, StorageError>;

    /// Total number of users
    async fn count(&self) -> Result<u64, StorageError>;
}
