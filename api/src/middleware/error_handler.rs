//! Outermost middleware: every error response leaves through the normalizer
//!
//! Handler, extractor and our own middleware failures arrive as responses
//! carrying an error and are re-rendered in place. A foreign middleware that
//! fails with `Err` no longer holds the request, so its error is replaced by
//! one whose response is the rendered envelope.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::{BoxBody, EitherBody, MessageBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::{HeaderMap, CONTENT_LENGTH, CONTENT_TYPE},
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;

use crate::handlers::error::{log_failure, normalize_error, Normalized};

/// Error normalization middleware factory
#[derive(Debug, Clone, Copy)]
pub struct ErrorNormalizer {
    expose_stack: bool,
}

impl ErrorNormalizer {
    /// `expose_stack` is only ever true in development
    pub fn new(expose_stack: bool) -> Self {
        Self { expose_stack }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ErrorNormalizer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorNormalizerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorNormalizerMiddleware {
            service: Rc::new(service),
            expose_stack: self.expose_stack,
        }))
    }
}

pub struct ErrorNormalizerMiddleware<S> {
    service: Rc<S>,
    expose_stack: bool,
}

impl<S, B> Service<ServiceRequest> for ErrorNormalizerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let expose_stack = self.expose_stack;
        // Owned copies only: the router needs sole ownership of the request
        let method = req.method().clone();
        let path = req.path().to_string();

        Box::pin(async move {
            match service.call(req).await {
                Ok(res) => {
                    let normalized = match res.response().error() {
                        None => return Ok(res.map_into_left_body()),
                        Some(error) => {
                            let normalized = normalize_error(error, expose_stack);
                            log_failure(&normalized, &method, &path, error);
                            normalized
                        }
                    };

                    let (request, original) = res.into_parts();
                    let response = rebuild(normalized, original.headers());
                    Ok(ServiceResponse::new(request, response).map_into_right_body())
                }
                // Middleware that gave up the request; the server renders this response
                Err(error) => {
                    let normalized = normalize_error(&error, expose_stack);
                    log_failure(&normalized, &method, &path, &error);

                    let response = rebuild(normalized, error.error_response().headers());
                    Err(InternalError::from_response(error.to_string(), response).into())
                }
            }
        })
    }
}

/// Render the envelope, carrying over headers that do not describe the old body
fn rebuild(normalized: Normalized, headers: &HeaderMap) -> HttpResponse<BoxBody> {
    let mut builder = HttpResponse::build(normalized.status_code());
    for (name, value) in headers {
        if name != CONTENT_TYPE && name != CONTENT_LENGTH {
            builder.append_header((name.clone(), value.clone()));
        }
    }
    builder.json(normalized.envelope)
}


#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{
        body::to_bytes,
        error::ErrorForbidden,
        http::{
            header::{HeaderValue, RETRY_AFTER},
            StatusCode,
        },
        test, web, App,
    };
    use serde_json::Value;

    use dv_core::errors::DomainError;

    use crate::handlers::ApiError;

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_rejection_keeps_its_headers() {
        let app = test::init_service(
            App::new()
                .wrap_fn(|req, _srv| {
                    let error = ApiError::from(DomainError::too_many_requests("Slow down"));
                    let mut res = req.error_response(error);
                    res.headers_mut()
                        .insert(RETRY_AFTER, HeaderValue::from_static("30"));
                    async move { Ok(res) }
                })
                .wrap(ErrorNormalizer::new(false))
                .route("/", web::get().to(ok)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(res.headers().get(RETRY_AFTER).unwrap(), "30");

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["status"], "fail");
        assert_eq!(body["code"], 429);
        assert_eq!(body["message"], "Slow down");
    }

    #[actix_web::test]
    async fn test_foreign_middleware_error_is_rendered_as_envelope() {
        let app = test::init_service(
            App::new()
                .wrap_fn(|_req, _srv| async {
                    Err::<ServiceResponse, Error>(ErrorForbidden("gate closed"))
                })
                .wrap(ErrorNormalizer::new(false))
                .route("/", web::get().to(ok)),
        )
        .await;

        let error = test::try_call_service(&app, test::TestRequest::get().uri("/").to_request())
            .await
            .unwrap_err();
        let res = error.error_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let bytes = to_bytes(res.into_body()).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "fail");
        assert_eq!(body["code"], 403);
        assert_eq!(body["message"], "gate closed");
    }

    #[actix_web::test]
    async fn test_scoped_routes_pass_through() {
        let app = test::init_service(
            App::new().wrap(ErrorNormalizer::new(false)).service(
                web::scope("/api").route("/items/{id}", web::get().to(ok)),
            ),
        )
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/api/items/7").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
