use actix_web::{
    cookie::{time::Duration, Cookie, SameSite},
    web, HttpResponse,
};

use dv_shared::types::SuccessEnvelope;

use crate::app::AppState;
use crate::dto::LoginRequest;
use crate::handlers::ApiError;
use crate::middleware::auth::TOKEN_COOKIE;
use crate::middleware::ValidatedJson;

/// Verify credentials, returning the token in the body and as a cookie
pub async fn login(
    state: web::Data<AppState>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let auth = state.auth_service.login(&body.email, &body.password).await?;

    let cookie = Cookie::build(TOKEN_COOKIE, auth.access_token.clone())
        .path("/")
        .http_only(true)
        .secure(state.config.is_production())
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(auth.expires_in))
        .finish();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(SuccessEnvelope::ok("Login successful", auth)))
}
