//! Unit tests for product service

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::product::{NewProduct, Product, ProductChanges};
use crate::errors::{Failure, StorageError};
use crate::repositories::ProductRepository;
use crate::services::product::ProductService;

#[derive(Default)]
struct MockProductRepository {
    products: RwLock<BTreeMap<u64, Product>>,
}

#[async_trait]
impl ProductRepository for MockProductRepository {
    async fn list(&self) -> Result<Vec<Product>, StorageError> {
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Product>, StorageError> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn create(&self, product: NewProduct) -> Result<Product, StorageError> {
        let mut products = self.products.write().await;
        let id = products.keys().next_back().copied().unwrap_or(0) + 1;
        let product = Product::new(id, product.name, product.price);
        products.insert(id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: u64, changes: ProductChanges) -> Result<Option<Product>, StorageError> {
        let mut products = self.products.write().await;
        Ok(products.get_mut(&id).map(|p| {
            changes.apply_to(p);
            p.clone()
        }))
    }

    async fn delete(&self, id: u64) -> Result<bool, StorageError> {
        Ok(self.products.write().await.remove(&id).is_some())
    }
}

fn not_found_code(failure: Failure) -> u16 {
    match failure {
        Failure::Domain(e) => {
            assert_eq!(e.message(), "Product not found");
            e.status_code()
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn test_crud_cycle() {
    let service = ProductService::new(Arc::new(MockProductRepository::default()));

    let created = service
        .create(NewProduct {
            name: "Laptop".into(),
            price: 80000.0,
        })
        .await
        .unwrap();
    assert_eq!(created.id, 1);

    let updated = service
        .update(
            1,
            ProductChanges {
                price: Some(75000.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Laptop");
    assert_eq!(updated.price, 75000.0);
    assert_eq!(service.count().await.unwrap(), 1);

    service.delete(1).await.unwrap();
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let service = ProductService::new(Arc::new(MockProductRepository::default()));
    assert_eq!(not_found_code(service.get(9).await.unwrap_err()), 404);
    assert_eq!(not_found_code(service.delete(9).await.unwrap_err()), 404);
    assert_eq!(
        not_found_code(service.update(9, ProductChanges::default()).await.unwrap_err()),
        404
    );
}
