use actix_web::web;

use dv_core::domain::value_objects::UserProfile;

use crate::app::AppState;
use crate::dto::UpdateProfileRequest;
use crate::handlers::{ApiError, Emit};
use crate::middleware::{AuthContext, ValidatedJson};

pub async fn get_profile(auth: AuthContext) -> Emit<UserProfile> {
    Emit::ok("Profile fetched successfully", UserProfile::from(auth.user))
}

/// Apply the caller's changes; an empty object leaves the profile untouched
pub async fn update_profile(
    state: web::Data<AppState>,
    auth: AuthContext,
    ValidatedJson(body): ValidatedJson<UpdateProfileRequest>,
) -> Result<Emit<UserProfile>, ApiError> {
    let user = state
        .user_service
        .update_profile(&auth.user_id().to_string(), body.into())
        .await?;

    Ok(Emit::ok("Profile updated successfully", UserProfile::from(user)))
}
