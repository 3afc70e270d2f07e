//! Profile updates, user listing and bans

use std::sync::Arc;

use dv_shared::types::{Pagination, PaginationMeta};

use crate::domain::entities::user::User;
use crate::domain::value_objects::ProfileChanges;
use crate::errors::{DomainError, Failure};
use crate::repositories::UserRepository;

pub struct UserService<U: UserRepository> {
    user_repository: Arc<U>,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(user_repository: Arc<U>) -> Self {
        Self { user_repository }
    }

    /// Apply `changes` to the account `user_id`
    pub async fn update_profile(&self, user_id: &str, changes: ProfileChanges) -> Result<User, Failure> {
        let mut user = self.get(user_id).await?;
        if changes.is_empty() {
            return Ok(user);
        }
        changes.apply_to(&mut user);
        Ok(self.user_repository.update(user).await?)
    }

    /// A page of accounts with its pagination metadata
    pub async fn list(&self, pagination: Pagination) -> Result<(Vec<User>, PaginationMeta), Failure> {
        let total = self.user_repository.count().await?;
        let users = self
            .user_repository
            .list(pagination.offset(), pagination.limit as usize)
            .await?;
        Ok((users, pagination.meta(total)))
    }

    /// Ban the account `user_id`
    ///
    /// A malformed id surfaces as the store's cast error.
    pub async fn ban(&self, user_id: &str) -> Result<User, Failure> {
        let mut user = self.get(user_id).await?;
        if user.is_admin() {
            return Err(DomainError::forbidden("Admins cannot be banned").into());
        }
        if user.is_banned {
            return Ok(user);
        }
        user.ban();
        let user = self.user_repository.update(user).await?;
        tracing::info!(user_id = %user.id, "user banned");
        Ok(user)
    }

    pub async fn count(&self) -> Result<u64, Failure> {
        Ok(self.user_repository.count().await?)
    }

    async fn get(&self, user_id: &str) -> Result<User, Failure> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found").into())
    }
}
