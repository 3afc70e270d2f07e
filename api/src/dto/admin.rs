use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use dv_core::domain::value_objects::UserProfile;
use dv_core::validation::{ObjectSchema, Rule};
use dv_shared::types::pagination::{DEFAULT_LIMIT, MAX_LIMIT};
use dv_shared::types::{Pagination, PaginationMeta};

use crate::middleware::RequestSchema;

static USER_LIST_QUERY_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| {
    ObjectSchema::new()
        .with_default("page", Rule::number().coerce().integer().min(1.0), 1)
        .with_default(
            "limit",
            Rule::number()
                .coerce()
                .integer()
                .min(1.0)
                .max(f64::from(MAX_LIMIT)),
            DEFAULT_LIMIT,
        )
});

static USER_PATH_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| {
    ObjectSchema::new().field("id", Rule::string().trim().min(1, "User id is required"))
});

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UserListQuery {
    pub page: u32,
    pub limit: u32,
}

impl RequestSchema for UserListQuery {
    fn schema() -> &'static ObjectSchema {
        &USER_LIST_QUERY_SCHEMA
    }
}

impl From<UserListQuery> for Pagination {
    fn from(query: UserListQuery) -> Self {
        Pagination::new(query.page, query.limit)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserPath {
    pub id: String,
}

impl RequestSchema for UserPath {
    fn schema() -> &'static ObjectSchema {
        &USER_PATH_SCHEMA
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_products: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserProfile>,
    pub pagination: PaginationMeta,
}
