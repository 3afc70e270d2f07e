//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access level of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account
    #[default]
    User,
    /// May reach the admin endpoints
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// A registered account
///
/// The password hash never leaves the service layer; responses use
/// [`UserProfile`](crate::domain::value_objects::UserProfile).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Stored lower-cased and trimmed
    pub email: String,
    pub password_hash: String,
    pub profile_image: String,
    pub bio: String,
    pub role: Role,
    pub is_banned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new account with the default role
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            profile_image: String::new(),
            bio: String::new(),
            role: Role::User,
            is_banned: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_bio(mut self, bio: Option<String>) -> Self {
        self.bio = bio.unwrap_or_default();
        self
    }

    /// Bans the account
    pub fn ban(&mut self) {
        self.is_banned = true;
        self.updated_at = Utc::now();
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Marks a profile change
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new("Ada".into(), "ada@example.com".into(), "hash".into());
        assert_eq!(user.role, Role::User);
        assert!(!user.is_banned);
        assert!(user.bio.is_empty());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_ban() {
        let mut user = User::new("Ada".into(), "ada@example.com".into(), "hash".into());
        user.ban();
        assert!(user.is_banned);
        assert!(user.updated_at >= user.created_at);
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::User.to_string(), "user");
        assert!("root".parse::<Role>().is_err());
    }
}
