//! Admin-only routes
//!
//! Mounted behind authentication, the admin role gate and the admin limiter.

use actix_web::web;

use dv_core::domain::value_objects::UserProfile;

use crate::app::AppState;
use crate::dto::{DashboardStats, UserListQuery, UserListResponse, UserPath};
use crate::handlers::{ApiError, Emit};
use crate::middleware::{ValidatedPath, ValidatedQuery};

pub async fn dashboard(state: web::Data<AppState>) -> Result<Emit<DashboardStats>, ApiError> {
    let stats = DashboardStats {
        total_users: state.user_service.count().await?,
        total_products: state.product_service.count().await?,
    };
    Ok(Emit::ok("Dashboard fetched successfully", stats))
}

pub async fn list_users(
    state: web::Data<AppState>,
    ValidatedQuery(query): ValidatedQuery<UserListQuery>,
) -> Result<Emit<UserListResponse>, ApiError> {
    let (users, pagination) = state.user_service.list(query.into()).await?;

    Ok(Emit::ok(
        "Users fetched successfully",
        UserListResponse {
            users: users.into_iter().map(UserProfile::from).collect(),
            pagination,
        },
    ))
}

/// Ban an account; a malformed id surfaces as a 400 cast failure
pub async fn ban_user(
    state: web::Data<AppState>,
    ValidatedPath(path): ValidatedPath<UserPath>,
) -> Result<Emit<UserProfile>, ApiError> {
    let user = state.user_service.ban(&path.id).await?;
    Ok(Emit::ok(
        format!("User {} has been banned.", path.id),
        UserProfile::from(user),
    ))
}
