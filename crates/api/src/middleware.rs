//! Named middleware used by the demo controllers.
//!
//! - `api-key` -- [`require_api_key`] rejects requests without an `x-api-key` header.
//! - `no-store` -- [`no_store`] marks responses as uncacheable.

use axum::extract::Request;
use axum::http::header::CACHE_CONTROL;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::binding::AxumBinding;

pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

pub async fn require_api_key(request: Request, next: Next) -> Response {
    let present = request
        .headers()
        .get(&API_KEY_HEADER)
        .is_some_and(|value| !value.is_empty());

    if !present {
        tracing::debug!(uri = %request.uri(), "Rejected request without API key");
        let body = json!({
            "error": "Missing API key",
            "code": "UNAUTHORIZED",
        });
        return (StatusCode::UNAUTHORIZED, Json(body)).into_response();
    }

    next.run(request).await
}

pub async fn no_store(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

/// Register the middleware above under their route names.
pub fn register<S>(binding: AxumBinding<S>) -> AxumBinding<S>
where
    S: Clone + Send + Sync + 'static,
{
    binding
        .middleware("api-key", |route| {
            route.layer(middleware::from_fn(require_api_key))
        })
        .middleware("no-store", |route| route.layer(middleware::from_fn(no_store)))
}
