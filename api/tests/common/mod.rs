//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test, web,
};
use serde_json::{json, Value};

use dv_api::AppState;
use dv_core::domain::entities::user::Role;
use dv_core::repositories::UserRepository;
use dv_infra::InfrastructureServices;
use dv_shared::config::{AppConfig, JwtConfig};

pub const PASSWORD: &str = "s3cret-pass";

/// Development config with a cheap bcrypt cost
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.auth.jwt = JwtConfig::new("integration-test-secret");
    config.auth.password.bcrypt_cost = 4;
    config
}

pub fn state_with(config: AppConfig) -> (web::Data<AppState>, InfrastructureServices) {
    let infra = InfrastructureServices::in_memory();
    let state = web::Data::new(AppState::new(config, &infra));
    (state, infra)
}

/// Call the service and decode the JSON body
pub async fn send<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(app, req).await;
    let status = res.status();
    let body: Value = test::read_body_json(res).await;
    (status, body)
}

pub fn register_request(name: &str, email: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/users/register")
        .set_json(json!({ "name": name, "email": email, "password": PASSWORD }))
}

pub fn login_request(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(json!({ "email": email, "password": password }))
}

/// Access token from a successful login body
pub fn access_token(body: &Value) -> String {
    body["data"]["accessToken"]
        .as_str()
        .expect("login response carries an access token")
        .to_string()
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// Give an existing account the admin role
pub async fn promote_to_admin(infra: &InfrastructureServices, email: &str) {
    let mut user = infra
        .users
        .find_by_email(email)
        .await
        .expect("store is available")
        .expect("user exists");
    user.role = Role::Admin;
    infra.users.update(user).await.expect("update succeeds");
}
