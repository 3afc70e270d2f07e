//! Health and welcome endpoints

use crate::handlers::Emit;

/// Liveness check
pub async fn health() -> Emit {
    Emit::message("Server is running")
}

pub async fn root() -> Emit {
    Emit::message("Welcome to Dasvilson Server")
}

pub async fn api_root() -> Emit {
    Emit::message("Welcome to the API")
}
