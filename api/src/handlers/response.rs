//! Success responses

use actix_web::{body::BoxBody, http::StatusCode, HttpRequest, HttpResponse, Responder};
use serde::Serialize;

use dv_shared::types::SuccessEnvelope;

/// Wraps a [`SuccessEnvelope`] so handlers can return it directly
///
/// The HTTP status mirrors the envelope's `code`.
#[derive(Debug, Clone)]
pub struct Emit<T = serde_json::Value>(pub SuccessEnvelope<T>);

impl<T> Emit<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Emit(SuccessEnvelope::ok(message, data))
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Emit(SuccessEnvelope::created(message, data))
    }

    pub fn message(message: impl Into<String>) -> Self {
        Emit(SuccessEnvelope::message(message))
    }
}

impl<T: Serialize> Responder for Emit<T> {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        let status = StatusCode::from_u16(self.0.code).unwrap_or(StatusCode::OK);
        HttpResponse::build(status).json(self.0)
    }
}
