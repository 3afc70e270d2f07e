//! Route handlers grouped by resource
//!
//! - `system` - health and welcome endpoints
//! - `users` - registration, login and the caller's own profile
//! - `products` - the product catalog
//! - `admin` - dashboard, user listing and bans

pub mod admin;
pub mod products;
pub mod system;
pub mod users;
