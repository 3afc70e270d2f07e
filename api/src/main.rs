use actix_web::{web, HttpServer};
use anyhow::Context;

use dv_api::{config, create_app, AppState};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let app_config = config::load()?;
    config::init_tracing(&app_config.logging)?;

    if app_config.auth.jwt.is_using_default_secret() {
        tracing::warn!("JWT_ACCESS_TOKEN_SECRET is not set; using the development secret");
    }

    let server = app_config.server.clone();
    let bind_address = server.bind_address();
    tracing::info!(
        environment = %app_config.environment,
        address = %bind_address,
        "Starting Dasvilson API Server"
    );

    let infra = dv_infra::initialize().await;
    let state = web::Data::new(AppState::new(app_config, &infra));

    let mut http = HttpServer::new(move || create_app(state.clone()))
        .shutdown_timeout(server.shutdown_timeout);
    if server.workers > 0 {
        http = http.workers(server.workers);
    }

    http.bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
