//! Product catalog persistence.

use async_trait::async_trait;

use crate::domain::entities::product::{NewProduct, Product, ProductChanges};
use crate::errors::StorageError;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products ordered by id
    async fn list(&self) -> Result<Vec<Product>, StorageError>;

    async fn find_by_id(&self, id: u64) -> Result<Option<Product>, StorageError>;

    /// Store a new product and assign its id
    async fn create(&self, product: NewProduct) -> Result<Product, StorageError>;

    /// Apply `changes`; `Ok(None)` when the product does not exist
    async fn update(&self, id: u64, changes: ProductChanges)
        -> Result<Option<Product>, StorageError>;

    /// Remove a product; `Ok(false)` when it did not exist
    async fn delete(&self, id: u64) -> Result<bool, StorageError>;
}
