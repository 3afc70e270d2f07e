//! Rate limiting middleware for API endpoints
//!
//! Fixed-window limits counted in a [`RateLimitStore`](dv_core::repositories::RateLimitStore).
//! Each policy keys requests differently: the global and login limits by
//! client IP, the admin limit by authenticated user id. Every counted
//! response carries `RateLimit-Limit`, `RateLimit-Remaining` and
//! `RateLimit-Reset`; a rejection adds `Retry-After`.

use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER},
    Error, HttpMessage, HttpResponse,
};
use futures_util::future::LocalBoxFuture;

use dv_core::errors::DomainError;
use dv_core::services::{RateLimitDecision, RateLimiter};
use dv_shared::config::{RateLimitConfig, WindowLimit};

use crate::handlers::ApiError;
use crate::middleware::auth::AuthContext;

pub const RATE_LIMIT_LIMIT: &str = "ratelimit-limit";
pub const RATE_LIMIT_REMAINING: &str = "ratelimit-remaining";
pub const RATE_LIMIT_RESET: &str = "ratelimit-reset";

/// Which traffic a limiter counts and how it keys it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitPolicy {
    /// Every request, per client IP
    Global,
    /// Failed logins, per client IP
    Login,
    /// Admin endpoints, per user id
    Admin,
}

impl RateLimitPolicy {
    fn name(&self) -> &'static str {
        match self {
            RateLimitPolicy::Global => "global",
            RateLimitPolicy::Login => "login",
            RateLimitPolicy::Admin => "admin",
        }
    }

    fn message(&self) -> &'static str {
        match self {
            RateLimitPolicy::Global => "Too many requests from this IP. Try again later.",
            RateLimitPolicy::Login => "Too many failed logins. Try again later.",
            RateLimitPolicy::Admin => "Too many admin requests. Slow down!",
        }
    }

    fn limit(&self, config: &RateLimitConfig) -> WindowLimit {
        match self {
            RateLimitPolicy::Global => config.global,
            RateLimitPolicy::Login => config.login,
            RateLimitPolicy::Admin => config.admin,
        }
    }

    /// Successful requests give their hit back
    fn skip_successful(&self) -> bool {
        matches!(self, RateLimitPolicy::Login)
    }

    fn key(&self, req: &ServiceRequest) -> String {
        let user_id = match self {
            RateLimitPolicy::Admin => req
                .extensions()
                .get::<AuthContext>()
                .map(|ctx| ctx.user_id().to_string()),
            _ => None,
        };
        let subject = user_id.unwrap_or_else(|| client_ip(req));
        format!("rate_limit:{}:{}", self.name(), subject)
    }
}

/// Client address, honouring proxy headers
fn client_ip(req: &ServiceRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| String::from("unknown"))
}

/// Rate limiter middleware factory
#[derive(Clone)]
pub struct RateLimit {
    policy: RateLimitPolicy,
    limiter: RateLimiter,
    limit: WindowLimit,
    enabled: bool,
}

impl RateLimit {
    pub fn new(policy: RateLimitPolicy, limiter: RateLimiter, config: &RateLimitConfig) -> Self {
        Self {
            policy,
            limiter,
            limit: policy.limit(config),
            enabled: config.enabled,
        }
    }

    pub fn global(limiter: RateLimiter, config: &RateLimitConfig) -> Self {
        Self::new(RateLimitPolicy::Global, limiter, config)
    }

    pub fn login(limiter: RateLimiter, config: &RateLimitConfig) -> Self {
        Self::new(RateLimitPolicy::Login, limiter, config)
    }

    pub fn admin(limiter: RateLimiter, config: &RateLimitConfig) -> Self {
        Self::new(RateLimitPolicy::Admin, limiter, config)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            config: Rc::new(self.clone()),
        }))
    }
}

/// Rate limiter middleware service
pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    config: Rc<RateLimit>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let config = Rc::clone(&self.config);

        Box::pin(async move {
            if !config.enabled {
                return service.call(req).await.map(ServiceResponse::map_into_left_body);
            }

            let key = config.policy.key(&req);
            let decision = match config.limiter.check(&key, config.limit).await {
                Ok(decision) => decision,
                Err(e) => {
                    return Ok(req.error_response(ApiError::from(e)).map_into_right_body());
                }
            };

            if !decision.allowed {
                let error = ApiError::from(DomainError::too_many_requests(config.policy.message()));
                let mut response = HttpResponse::from_error(error);
                apply_headers(response.headers_mut(), &decision);
                insert(response.headers_mut(), RETRY_AFTER, decision.reset_secs());
                return Ok(req.into_response(response).map_into_right_body());
            }

            let mut res = service.call(req).await?;

            if config.policy.skip_successful() && res.status().as_u16() < 400 {
                if let Err(e) = config.limiter.release(&key).await {
                    tracing::warn!(key = %key, error = %e, "failed to release rate limit hit");
                }
            }

            apply_headers(res.headers_mut(), &decision);
            Ok(res.map_into_left_body())
        })
    }
}

fn apply_headers(headers: &mut HeaderMap, decision: &RateLimitDecision) {
    insert(headers, HeaderName::from_static(RATE_LIMIT_LIMIT), decision.limit);
    insert(headers, HeaderName::from_static(RATE_LIMIT_REMAINING), decision.remaining);
    insert(headers, HeaderName::from_static(RATE_LIMIT_RESET), decision.reset_secs());
}

fn insert(headers: &mut HeaderMap, name: HeaderName, value: impl Into<u64>) {
    headers.insert(name, HeaderValue::from(value.into()));
}
