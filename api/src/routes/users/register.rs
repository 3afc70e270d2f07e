use actix_web::web;

use dv_core::domain::value_objects::UserProfile;

use crate::app::AppState;
use crate::dto::{RegisterResponse, SignupRequest};
use crate::handlers::{ApiError, Emit};
use crate::middleware::ValidatedJson;

/// Create an account
///
/// Responds 201 with the stored profile. A taken email yields 409 either from
/// the pre-check or, for a racing request, from the store's unique index.
pub async fn register(
    state: web::Data<AppState>,
    ValidatedJson(body): ValidatedJson<SignupRequest>,
) -> Result<Emit<RegisterResponse>, ApiError> {
    let user = state.auth_service.register(body.into()).await?;

    Ok(Emit::created(
        "User registered successfully",
        RegisterResponse {
            user: UserProfile::from(user),
        },
    ))
}
