//! Request ID middleware for request tracing.
//!
//! This middleware ensures every request has a unique identifier for tracing
//! and correlation purposes. It either uses an existing X-Request-ID header
//! or generates a new UUID. A companion middleware stamps the ID into error
//! bodies so clients can quote it when reporting failures.

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderName, HeaderValue, header},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::dto::ErrorResponse;

/// Header name for request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID stored in request extensions for downstream access.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Middleware that ensures every request has a unique request ID.
///
/// # Behavior
/// - If the request contains an X-Request-ID header, uses that value
/// - If no header is present, generates a new UUID v4
/// - Stores the request ID in request extensions for downstream handlers
/// - Adds the request ID to the response headers
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    response
}

/// Middleware that rewrites error bodies to carry the request ID.
///
/// Error responses leave a copy of their payload in the response extensions
/// (see the AppError IntoResponse impl); this middleware reserializes that
/// payload with the correlation ID filled in. It must sit inside the
/// compression layer so the body it replaces is still plain JSON.
/// Non-error responses pass through untouched.
pub async fn error_correlation_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone());

    let mut response = next.run(request).await;

    if let Some(id) = request_id {
        stamp_error_body(&mut response, &id);
    }

    response
}

/// Replaces a stashed error body with one carrying the request ID.
fn stamp_error_body(response: &mut Response, request_id: &str) {
    let Some(body) = response.extensions_mut().remove::<ErrorResponse>() else {
        return;
    };

    if let Ok(bytes) = serde_json::to_vec(&body.with_request_id(request_id)) {
        response
            .headers_mut()
            .insert(header::CONTENT_LENGTH, HeaderValue::from(bytes.len()));
        *response.body_mut() = Body::from(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_error_body_receives_request_id() {
        let mut response = AppError::NotFound {
            entity: "court".into(),
            field: "id".into(),
            value: "7".into(),
        }
        .into_response();

        stamp_error_body(&mut response, "req-123");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["request_id"], "req-123");
    }

    #[tokio::test]
    async fn test_content_length_matches_stamped_body() {
        let mut response = AppError::Unauthorized {
            message: "no token".into(),
        }
        .into_response();

        stamp_error_body(&mut response, "req-456");

        let declared: usize = response
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(declared, bytes.len());
    }

    #[tokio::test]
    async fn test_non_error_responses_pass_through() {
        let mut response = (StatusCode::OK, "ok").into_response();

        stamp_error_body(&mut response, "req-789");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"ok");
    }
}
