//! JWT authentication middleware for protecting API endpoints.
//!
//! The token is read from the `token` cookie first, then from an
//! `Authorization: Bearer` header. A verified token is resolved to its account
//! and the result injected into the request as an [`AuthContext`].

use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use dv_core::domain::entities::user::{Role, User};
use dv_core::errors::DomainError;

use crate::app::AppState;
use crate::handlers::ApiError;

/// Cookie carrying the access token
pub const TOKEN_COOKIE: &str = "token";

/// The authenticated account, injected into request extensions
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: User,
}

impl AuthContext {
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    pub fn role(&self) -> Role {
        self.user.role
    }
}

fn no_token() -> ApiError {
    DomainError::unauthorized("Unauthorized: No token provided").into()
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let outcome = authenticate(&req).await;
            let context = match outcome {
                Ok(context) => context,
                Err(error) => return Ok(req.error_response(error).map_into_right_body()),
            };

            tracing::debug!(user_id = %context.user_id(), "request authenticated");
            req.extensions_mut().insert(context);

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

async fn authenticate(req: &ServiceRequest) -> Result<AuthContext, ApiError> {
    let token = extract_token(req.request()).ok_or_else(no_token)?;

    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| ApiError::from(anyhow::anyhow!("application state is not registered")))?;

    let user = state.auth_service.authenticate(&token).await?;
    Ok(AuthContext { user })
}

/// Token from the `token` cookie, else from a Bearer authorization header
pub fn extract_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(TOKEN_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Role gate; must run inside [`JwtAuth`]
#[derive(Debug, Clone)]
pub struct RequireRole {
    roles: Rc<[Role]>,
}

impl RequireRole {
    pub fn new(roles: &[Role]) -> Self {
        Self {
            roles: Rc::from(roles),
        }
    }

    pub fn admin() -> Self {
        Self::new(&[Role::Admin])
    }

    fn denied_message(roles: &[Role]) -> String {
        let names: Vec<&str> = roles.iter().map(Role::as_str).collect();
        format!("Access denied. Only {} allowed.", names.join(" or "))
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            roles: Rc::clone(&self.roles),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    roles: Rc<[Role]>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let role = req.extensions().get::<AuthContext>().map(AuthContext::role);

        let denied: Option<ApiError> = match role {
            None => Some(no_token()),
            Some(role) if self.roles.contains(&role) => None,
            Some(_) => Some(DomainError::forbidden(RequireRole::denied_message(&self.roles)).into()),
        };

        Box::pin(async move {
            if let Some(error) = denied {
                return Ok(req.error_response(error).map_into_right_body());
            }
            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(no_token);

        ready(result)
    }
}
