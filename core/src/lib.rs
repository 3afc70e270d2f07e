//! # Dasvilson Core
//!
//! Core business logic and domain layer for the Dasvilson backend.
//! This crate contains domain entities, business services, repository interfaces,
//! the failure taxonomy every handler reports through, and the declarative
//! payload validator.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod validation;

// Re-export commonly used types for convenience
pub use domain::entities::{Claims, NewProduct, Product, ProductChanges, Role, User};
pub use domain::value_objects::{AuthResponse, ProfileChanges, UserProfile};
pub use errors::{
    DomainError, DomainResult, Failure, MessageError, ParseFailure, PayloadSource, StorageError,
    TokenError, ValidationFailure,
};
pub use repositories::{ProductRepository, RateLimitHit, RateLimitStore, UserRepository};
pub use services::{
    AuthService, AuthServiceConfig, ProductService, RateLimitDecision, RateLimiter, Registration,
    TokenService, UserService,
};
