//! Catalog reads and writes with not-found handling

use std::sync::Arc;

use crate::domain::entities::product::{NewProduct, Product, ProductChanges};
use crate::errors::{DomainError, Failure};
use crate::repositories::ProductRepository;

pub struct ProductService<P: ProductRepository> {
    product_repository: Arc<P>,
}

impl<P: ProductRepository> ProductService<P> {
    pub fn new(product_repository: Arc<P>) -> Self {
        Self { product_repository }
    }

    pub async fn list(&self) -> Result<Vec<Product>, Failure> {
        Ok(self.product_repository.list().await?)
    }

    pub async fn get(&self, id: u64) -> Result<Product, Failure> {
        self.product_repository
            .find_by_id(id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn create(&self, product: NewProduct) -> Result<Product, Failure> {
        Ok(self.product_repository.create(product).await?)
    }

    pub async fn update(&self, id: u64, changes: ProductChanges) -> Result<Product, Failure> {
        self.product_repository
            .update(id, changes)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn delete(&self, id: u64) -> Result<(), Failure> {
        if self.product_repository.delete(id).await? {
            Ok(())
        } else {
            Err(not_found())
        }
    }

    pub async fn count(&self) -> Result<u64, Failure> {
        Ok(self.product_repository.list().await?.len() as u64)
    }
}

fn not_found() -> Failure {
    DomainError::not_found("Product not found").into()
}
