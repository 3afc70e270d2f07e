use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use dv_core::domain::entities::product::{NewProduct, ProductChanges};
use dv_core::validation::{ObjectSchema, Rule};

use crate::middleware::RequestSchema;

static PRODUCT_PATH_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| {
    ObjectSchema::new().field(
        "id",
        Rule::number()
            .coerce()
            .integer()
            .min(1.0)
            .message("Product id must be a positive integer"),
    )
});

static CREATE_PRODUCT_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| {
    ObjectSchema::new()
        .field(
            "name",
            Rule::string()
                .trim()
                .min(1, "Product name is required")
                .max(120, "Product name must be at most 120 characters"),
        )
        .field(
            "price",
            Rule::number().min(0.0).message("Price must be a positive number"),
        )
});

static UPDATE_PRODUCT_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| {
    ObjectSchema::new()
        .optional(
            "name",
            Rule::string()
                .trim()
                .min(1, "Product name cannot be empty")
                .max(120, "Product name must be at most 120 characters"),
        )
        .optional(
            "price",
            Rule::number().min(0.0).message("Price must be a positive number"),
        )
});

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: f64,
}

impl RequestSchema for CreateProductRequest {
    fn schema() -> &'static ObjectSchema {
        &CREATE_PRODUCT_SCHEMA
    }
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            name: request.name,
            price: request.price,
        }
    }
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
}

impl RequestSchema for UpdateProductRequest {
    fn schema() -> &'static ObjectSchema {
        &UPDATE_PRODUCT_SCHEMA
    }
}

impl From<UpdateProductRequest> for ProductChanges {
    fn from(request: UpdateProductRequest) -> Self {
        ProductChanges {
            name: request.name,
            price: request.price,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductPath {
    pub id: u64,
}

impl RequestSchema for ProductPath {
    fn schema() -> &'static ObjectSchema {
        &PRODUCT_PATH_SCHEMA
    }
}
