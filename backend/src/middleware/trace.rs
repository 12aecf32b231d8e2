//! Tracing middleware attaching a request-scoped trace identifier.
//!
//! A well-formed UUID in the inbound `trace-id` header is reused so callers can
//! correlate retries; otherwise a fresh identifier is generated. The value is
//! echoed on every response and scoped via [`TraceId::scope`] for handlers and
//! error constructors.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, error};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware adding a `trace-id` header to every response.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use volunteer_hub::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

fn inbound_trace_id(req: &ServiceRequest) -> Option<TraceId> {
    req.headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(TraceId::from_header_value)
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = inbound_trace_id(&req).unwrap_or_else(TraceId::generate);
        let method = req.method().clone();
        let path = req.path().to_owned();
        let fut = TraceId::scope(trace_id, self.service.call(req));
        Box::pin(async move {
            let mut res = fut.await?;
            debug!(
                trace_id = %trace_id,
                method = %method,
                path = %path,
                status = res.status().as_u16(),
                "request completed"
            );
            match HeaderValue::from_str(&trace_id.to_string()) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Err(error) => {
                    error!(%error, trace_id = %trace_id, "failed to encode trace identifier header");
                }
            }
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error as ApiError;
    use crate::inbound::http::ApiResult;
    use actix_web::{App, HttpResponse, test, web};

    async fn call_with(
        header: Option<&str>,
    ) -> (actix_web::dev::ServiceResponse<actix_web::body::BoxBody>, String) {
        let app = test::init_service(App::new().wrap(Trace).route(
            "/",
            web::get().to(|| async {
                let id = TraceId::current().expect("trace id in scope");
                HttpResponse::Ok().body(id.to_string())
            }),
        ))
        .await;
        let mut req = test::TestRequest::get().uri("/");
        if let Some(value) = header {
            req = req.insert_header((TRACE_ID_HEADER, value));
        }
        let res = test::call_service(&app, req.to_request()).await;
        let trace_id = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("header is ascii")
            .to_owned();
        (res, trace_id)
    }

    #[actix_web::test]
    async fn exposes_generated_trace_id_to_handlers() {
        let (res, trace_id) = call_with(None).await;
        let body = test::read_body(res).await;
        assert_eq!(std::str::from_utf8(&body).expect("utf8"), trace_id);
    }

    #[actix_web::test]
    async fn reuses_well_formed_inbound_ids() {
        let inbound = "6f1d3c1e-2b7a-4c1f-9d7e-3f2a1b0c9d8e";
        let (_, trace_id) = call_with(Some(inbound)).await;
        assert_eq!(trace_id, inbound);
    }

    #[actix_web::test]
    async fn replaces_malformed_inbound_ids() {
        let (_, trace_id) = call_with(Some("not-a-trace")).await;
        assert_ne!(trace_id, "not-a-trace");
        assert!(TraceId::from_header_value(&trace_id).is_some());
    }

    #[actix_web::test]
    async fn error_bodies_carry_the_trace_id() {
        let app = test::init_service(App::new().wrap(Trace).route(
            "/",
            web::get().to(|| async { ApiResult::<HttpResponse>::Err(ApiError::internal("boom")) }),
        ))
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(
            body.get("traceId").and_then(|v| v.as_str()),
            header.as_deref()
        );
    }
}
