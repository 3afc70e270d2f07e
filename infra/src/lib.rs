//! # Infrastructure Layer
//!
//! Concrete implementations of the storage traits declared in `dv_core`.
//!
//! ## Architecture
//!
//! - **Database**: in-memory user and product stores that report failures as
//!   storage error kinds (cast, duplicate, field validation)
//! - **Cache**: fixed-window counters for the rate limiter

use std::sync::Arc;

use dv_core::repositories::{ProductRepository, RateLimitStore, UserRepository};

/// Persistence implementations
pub mod database;

/// Rate limit counter storage
pub mod cache;

pub use cache::InMemoryRateLimitStore;
pub use database::{InMemoryProductRepository, InMemoryUserRepository};

/// Infrastructure service container
///
/// Holds one shared instance of every store; cloning is cheap.
#[derive(Clone)]
pub struct InfrastructureServices {
    pub users: Arc<InMemoryUserRepository>,
    pub products: Arc<InMemoryProductRepository>,
    pub rate_limit_store: Arc<dyn RateLimitStore>,
}

impl InfrastructureServices {
    /// Empty stores, with the catalog seeded with its sample products
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            products: Arc::new(InMemoryProductRepository::seeded()),
            rate_limit_store: Arc::new(InMemoryRateLimitStore::new()),
        }
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    pub fn product_repository(&self) -> Arc<dyn ProductRepository> {
        self.products.clone()
    }
}

impl Default for InfrastructureServices {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Initialize infrastructure services
pub async fn initialize() -> InfrastructureServices {
    tracing::info!("Initializing infrastructure services...");
    let services = InfrastructureServices::in_memory();
    tracing::info!("Infrastructure services initialized successfully");
    services
}
