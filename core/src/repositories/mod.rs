//! Repository interfaces implemented by the infrastructure layer.

pub mod product;
pub mod rate_limit;
pub mod user;

pub use product::ProductRepository;
pub use rate_limit::{RateLimitHit, RateLimitStore};
pub use user::UserRepository;
