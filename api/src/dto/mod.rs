pub mod admin;
pub mod auth;
pub mod product;

pub use admin::*;
pub use auth::*;
pub use product::*;
