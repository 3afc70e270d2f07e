//! Tests for the in-memory product catalog

use dv_core::domain::entities::product::{NewProduct, ProductChanges};
use dv_core::repositories::ProductRepository;

use crate::database::InMemoryProductRepository;

#[tokio::test]
async fn test_seeded_catalog() {
    let repo = InMemoryProductRepository::seeded();
    let products = repo.list().await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Laptop");
    assert_eq!(products[1].price, 1200.0);
}

#[tokio::test]
async fn test_ids_continue_after_seed() {
    let repo = InMemoryProductRepository::seeded();
    let created = repo
        .create(NewProduct {
            name: "Keyboard".into(),
            price: 3500.0,
        })
        .await
        .unwrap();
    assert_eq!(created.id, 3);

    // Deleting does not recycle ids
    assert!(repo.delete(3).await.unwrap());
    let next = repo
        .create(NewProduct {
            name: "Monitor".into(),
            price: 20000.0,
        })
        .await
        .unwrap();
    assert_eq!(next.id, 4);
}

#[tokio::test]
async fn test_update_missing_product() {
    let repo = InMemoryProductRepository::new();
    let result = repo
        .update(
            1,
            ProductChanges {
                name: Some("Ghost".into()),
                price: None,
            },
        )
        .await
        .unwrap();
    assert!(result.is_none());
    assert!(!repo.delete(1).await.unwrap());
}
