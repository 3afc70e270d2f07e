//! Account management: own profile and admin operations

mod service;


pub use service::UserService;
