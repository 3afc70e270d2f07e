pub mod auth;
pub mod error_handler;
pub mod rate_limit;
pub mod validation;

pub use auth::{AuthContext, JwtAuth, RequireRole};
pub use error_handler::ErrorNormalizer;
pub use rate_limit::{RateLimit, RateLimitPolicy};
pub use validation::{RequestSchema, ValidatedJson, ValidatedPath, ValidatedQuery};
