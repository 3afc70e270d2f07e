//! Request extractors that decode and validate payloads
//!
//! Decoding failures become [`ParseFailure`]s naming the request segment;
//! shape violations become a `ValidationFailure` listing every issue. On
//! success the handler receives the coerced, typed payload.

use std::collections::BTreeMap;
use std::future::{ready, Ready};

use actix_web::{
    dev::Payload,
    web::{self, Bytes},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use dv_core::errors::{DomainError, ParseFailure, PayloadSource};
use dv_core::validation::{validate, ObjectSchema};

use crate::handlers::ApiError;

/// A payload type with a declared schema
///
/// The schema is applied to the raw JSON before deserialization, so `T` only
/// ever sees coerced values with undeclared keys stripped.
pub trait RequestSchema: DeserializeOwned {
    fn schema() -> &'static ObjectSchema;
}

/// JSON body checked against `T::schema()`
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: RequestSchema + 'static> FromRequest for ValidatedJson<T> {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = Bytes::from_request(req, payload);
        let req = req.clone();

        Box::pin(async move {
            let body = body.await?;
            let value = decode_body(&req, &body)?;
            let value = validate(T::schema(), &value).map_err(ApiError::from)?;
            let payload = typed(value, PayloadSource::Body)?;
            Ok(ValidatedJson(payload))
        })
    }
}

/// Query string checked against `T::schema()`
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<T> ValidatedQuery<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: RequestSchema> FromRequest for ValidatedQuery<T> {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract_query(req).map(ValidatedQuery))
    }
}

fn extract_query<T: RequestSchema>(req: &HttpRequest) -> Result<T, ApiError> {
    let pairs = web::Query::<BTreeMap<String, String>>::from_query(req.query_string())
        .map_err(|e| ParseFailure::new(PayloadSource::Query, e.to_string()))?
        .into_inner();

    let value = Value::Object(
        pairs
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect(),
    );
    let value = validate(T::schema(), &value)?;
    typed(value, PayloadSource::Query)
}

/// Path parameters checked against `T::schema()`
#[derive(Debug)]
pub struct ValidatedPath<T>(pub T);

impl<T> ValidatedPath<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: RequestSchema> FromRequest for ValidatedPath<T> {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract_path(req).map(ValidatedPath))
    }
}

fn extract_path<T: RequestSchema>(req: &HttpRequest) -> Result<T, ApiError> {
    let params: Map<String, Value> = req
        .match_info()
        .iter()
        .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
        .collect();

    let value = validate(T::schema(), &Value::Object(params))?;
    typed(value, PayloadSource::Path)
}

/// Parse a JSON body; an absent body is reported apart from a malformed one
fn decode_body(req: &HttpRequest, body: &[u8]) -> Result<Value, ApiError> {
    let content_type = req.content_type();
    let not_json = !content_type.is_empty() && !content_type.contains("json");

    if not_json || body.iter().all(u8::is_ascii_whitespace) {
        return Err(DomainError::bad_request("No data found in request body").into());
    }

    serde_json::from_slice(body)
        .map_err(|e| ParseFailure::new(PayloadSource::Body, e.to_string()).into())
}

fn typed<T: DeserializeOwned>(value: Value, segment: PayloadSource) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ParseFailure::new(segment, e.to_string()).into())
}
