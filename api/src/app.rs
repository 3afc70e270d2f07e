//! Application state and factory
//!
//! This module wires the services into shared state and builds the Actix-web
//! application with its middleware stack and routes.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use tracing_actix_web::TracingLogger;

use dv_core::services::{AuthService, AuthServiceConfig, ProductService, RateLimiter, TokenService, UserService};
use dv_infra::{InMemoryProductRepository, InMemoryUserRepository, InfrastructureServices};
use dv_shared::config::AppConfig;

use crate::handlers::error::route_not_found;
use crate::middleware::{ErrorNormalizer, JwtAuth, RateLimit, RequireRole};
use crate::routes::{admin, products, system, users};

/// Services shared by every worker
pub struct AppState {
    pub config: AppConfig,
    pub auth_service: AuthService<InMemoryUserRepository>,
    pub user_service: UserService<InMemoryUserRepository>,
    pub product_service: ProductService<InMemoryProductRepository>,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(config: AppConfig, infra: &InfrastructureServices) -> Self {
        let token_service = TokenService::new(&config.auth.jwt);

        Self {
            auth_service: AuthService::new(
                infra.users.clone(),
                token_service,
                AuthServiceConfig::from(&config.auth),
            ),
            user_service: UserService::new(infra.users.clone()),
            product_service: ProductService::new(infra.products.clone()),
            rate_limiter: RateLimiter::new(infra.rate_limit_store.clone()),
            config,
        }
    }
}

/// Create and configure the application with all dependencies
///
/// Middleware order, outermost first: error normalization, request tracing,
/// the global rate limit. Admin routes additionally pass authentication, the
/// role gate and the admin limit, in that order.
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let config = &state.config;
    let limiter = state.rate_limiter.clone();

    App::new()
        .app_data(state.clone())
        .app_data(web::PayloadConfig::new(config.server.max_payload_size))
        .wrap(RateLimit::global(limiter.clone(), &config.rate_limit))
        .wrap(TracingLogger::default())
        .wrap(ErrorNormalizer::new(config.expose_stack()))
        .route("/health", web::get().to(system::health))
        .route("/", web::get().to(system::root))
        .service(
            web::scope("/api/v1")
                .route("/", web::get().to(system::api_root))
                .service(
                    web::scope("/users")
                        .route("/register", web::post().to(users::register))
                        .service(
                            web::resource("/login")
                                .default_service(web::route().to(route_not_found))
                                .wrap(RateLimit::login(limiter.clone(), &config.rate_limit))
                                .route(web::post().to(users::login)),
                        )
                        .service(
                            web::resource("/profile")
                                .default_service(web::route().to(route_not_found))
                                .wrap(JwtAuth::new())
                                .route(web::get().to(users::get_profile))
                                .route(web::patch().to(users::update_profile)),
                        ),
                )
                .service(
                    web::scope("/products")
                        .route("", web::get().to(products::list_products))
                        .route("", web::post().to(products::create_product))
                        .route("/{id}", web::get().to(products::get_product))
                        .route("/{id}", web::patch().to(products::update_product))
                        .route("/{id}", web::delete().to(products::delete_product)),
                )
                .service(
                    web::scope("/admin")
                        .wrap(RateLimit::admin(limiter, &config.rate_limit))
                        .wrap(RequireRole::admin())
                        .wrap(JwtAuth::new())
                        .route("/dashboard", web::get().to(admin::dashboard))
                        .route("/users", web::get().to(admin::list_users))
                        .route("/users/{id}/ban", web::post().to(admin::ban_user)),
                ),
        )
        .default_service(web::route().to(route_not_found))
}
