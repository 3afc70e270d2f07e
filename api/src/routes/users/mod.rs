//! Account routes
//!
//! - `POST /register` - create an account
//! - `POST /login` - exchange credentials for an access token
//! - `GET /profile`, `PATCH /profile` - the caller's own account

pub mod login;
pub mod profile;
pub mod register;

pub use login::login;
pub use profile::{get_profile, update_profile};
pub use register::register;
