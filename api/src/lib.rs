//! # Dasvilson API
//!
//! HTTP layer of the Dasvilson backend: routes, request validation
//! extractors, authentication and rate limiting middleware, and the error
//! normalizer every failure passes through on its way to the client.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState};
