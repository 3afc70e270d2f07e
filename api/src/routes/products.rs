//! Product catalog routes

use actix_web::web;

use dv_core::domain::entities::product::Product;

use crate::app::AppState;
use crate::dto::{CreateProductRequest, ProductPath, UpdateProductRequest};
use crate::handlers::{ApiError, Emit};
use crate::middleware::{ValidatedJson, ValidatedPath};

pub async fn list_products(state: web::Data<AppState>) -> Result<Emit<Vec<Product>>, ApiError> {
    let products = state.product_service.list().await?;
    Ok(Emit::ok("Products fetched successfully", products))
}

pub async fn get_product(
    state: web::Data<AppState>,
    ValidatedPath(path): ValidatedPath<ProductPath>,
) -> Result<Emit<Product>, ApiError> {
    let product = state.product_service.get(path.id).await?;
    Ok(Emit::ok("Product fetched successfully", product))
}

pub async fn create_product(
    state: web::Data<AppState>,
    ValidatedJson(body): ValidatedJson<CreateProductRequest>,
) -> Result<Emit<Product>, ApiError> {
    let product = state.product_service.create(body.into()).await?;
    Ok(Emit::created("Product created", product))
}

pub async fn update_product(
    state: web::Data<AppState>,
    ValidatedPath(path): ValidatedPath<ProductPath>,
    ValidatedJson(body): ValidatedJson<UpdateProductRequest>,
) -> Result<Emit<Product>, ApiError> {
    let product = state.product_service.update(path.id, body.into()).await?;
    Ok(Emit::ok(format!("Product {} updated.", path.id), product))
}

pub async fn delete_product(
    state: web::Data<AppState>,
    ValidatedPath(path): ValidatedPath<ProductPath>,
) -> Result<Emit, ApiError> {
    state.product_service.delete(path.id).await?;
    Ok(Emit::message(format!("Product {} deleted.", path.id)))
}
