//! Main authentication service implementation

use std::sync::Arc;

use dv_shared::utils::normalize_email;

use crate::domain::entities::user::User;
use crate::domain::value_objects::{AuthResponse, UserProfile};
use crate::errors::{DomainError, Failure, StorageError};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::password::{hash_password, verify_password};

/// Input for account registration
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub bio: Option<String>,
}

/// Authentication service for registration, login and token resolution
pub struct AuthService<U: UserRepository> {
    /// User repository for persistence
    user_repository: Arc<U>,
    /// Token service for JWT management
    token_service: TokenService,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U: UserRepository> AuthService<U> {
    /// Create a new authentication service
    pub fn new(user_repository: Arc<U>, token_service: TokenService, config: AuthServiceConfig) -> Self {
        Self {
            user_repository,
            token_service,
            config,
        }
    }

    /// Register a new account
    ///
    /// The email is normalized before the uniqueness check. A registration
    /// racing past the check still fails in the store with a duplicate-key
    /// error, which propagates unchanged.
    pub async fn register(&self, registration: Registration) -> Result<User, Failure> {
        if !self.config.allow_registration {
            return Err(DomainError::forbidden("Registration is currently disabled").into());
        }

        let email = normalize_email(&registration.email);
        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(DomainError::conflict("User already exists with this email").into());
        }

        let password_hash = hash_password(registration.password, self.config.bcrypt_cost).await?;
        let user = User::new(registration.name.trim().to_string(), email, password_hash)
            .with_bio(registration.bio);

        let user = self.user_repository.create(user).await?;
        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Verify credentials and issue an access token
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, Failure> {
        let email = normalize_email(email);
        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found"))?;

        if !verify_password(password.to_string(), user.password_hash.clone()).await? {
            tracing::warn!(user_id = %user.id, "login rejected: wrong password");
            return Err(DomainError::unauthorized("Invalid email or password").into());
        }

        if user.is_banned {
            return Err(banned());
        }

        let token = self.token_service.issue(&user)?;
        tracing::info!(user_id = %user.id, "user logged in");

        Ok(AuthResponse::new(
            token,
            self.token_service.expires_in(),
            UserProfile::from(&user),
        ))
    }

    /// Resolve an access token to the account it was issued for
    pub async fn authenticate(&self, token: &str) -> Result<User, Failure> {
        let claims = self.token_service.verify(token)?;

        let user = match self.user_repository.find_by_id(&claims.sub).await {
            Ok(user) => user,
            // A subject we cannot even parse was not issued by us
            Err(StorageError::Cast { .. }) => {
                return Err(DomainError::unauthorized("Unauthorized: Invalid or expired token").into())
            }
            Err(e) => return Err(e.into()),
        };

        let user = user.ok_or_else(|| DomainError::unauthorized("User no longer exists"))?;
        if user.is_banned {
            return Err(banned());
        }
        Ok(user)
    }

    /// Token lifetime in seconds, for cookie max-age
    pub fn token_ttl(&self) -> i64 {
        self.token_service.expires_in()
    }
}

fn banned() -> Failure {
    DomainError::forbidden("Your account has been banned").into()
}
