//! Business services containing domain logic and use cases.

pub mod auth;
pub mod product;
pub mod rate_limit;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, Registration};
pub use product::ProductService;
pub use rate_limit::{RateLimitDecision, RateLimiter};
pub use token::TokenService;
pub use user::UserService;
