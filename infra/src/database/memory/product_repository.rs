//! In-memory implementation of ProductRepository

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use dv_core::domain::entities::product::{NewProduct, Product, ProductChanges};
use dv_core::errors::StorageError;
use dv_core::repositories::ProductRepository;

#[derive(Default)]
struct Catalog {
    products: BTreeMap<u64, Product>,
    next_id: u64,
}

/// Product catalog keyed by id
#[derive(Clone)]
pub struct InMemoryProductRepository {
    catalog: Arc<RwLock<Catalog>>,
}

impl InMemoryProductRepository {
    /// An empty catalog
    pub fn new() -> Self {
        Self::with_products(Vec::new())
    }

    /// The starter catalog
    pub fn seeded() -> Self {
        Self::with_products(vec![
            Product::new(1, "Laptop", 80000.0),
            Product::new(2, "Mouse", 1200.0),
        ])
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        let next_id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let products = products.into_iter().map(|p| (p.id, p)).collect();
        Self {
            catalog: Arc::new(RwLock::new(Catalog { products, next_id })),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> Result<Vec<Product>, StorageError> {
        Ok(self.catalog.read().await.products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Product>, StorageError> {
        Ok(self.catalog.read().await.products.get(&id).cloned())
    }

    async fn create(&self, product: NewProduct) -> Result<Product, StorageError> {
        let mut catalog = self.catalog.write().await;
        let id = catalog.next_id;
        catalog.next_id += 1;

        let product = Product::new(id, product.name, product.price);
        catalog.products.insert(id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: u64, changes: ProductChanges) -> Result<Option<Product>, StorageError> {
        let mut catalog = self.catalog.write().await;
        Ok(catalog.products.get_mut(&id).map(|product| {
            changes.apply_to(product);
            product.clone()
        }))
    }

    async fn delete(&self, id: u64) -> Result<bool, StorageError> {
        Ok(self.catalog.write().await.products.remove(&id).is_some())
    }
}
