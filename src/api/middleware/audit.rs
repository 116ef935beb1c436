//! Access logging middleware.
//!
//! Records method, path, header shape, and response status of every
//! request. Runs outermost so rejected and unknown routes are logged too.

use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::Response;

use crate::api::middleware::auth::bearer_token;
use crate::api::types::{AccessEntry, ApiContext};

/// Log API access for the audit trail.
/// Accesses `ApiContext` from request extensions.
pub async fn log_access(req: Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let bearer = bearer_token(&req).is_some();
    let json_content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));

    let ctx = req.extensions().get::<ApiContext>().cloned();

    let response = next.run(req).await;
    let status = response.status().as_u16();

    tracing::debug!(%method, %path, bearer, status, "API access");

    if let Some(ctx) = ctx {
        ctx.record_access(AccessEntry {
            method,
            path,
            bearer,
            json_content_type,
            status,
        });
    }

    response
}
