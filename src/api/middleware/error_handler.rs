//! Error handler for converting AppError to HTTP responses.
//!
//! Implements the IntoResponse trait for AppError, providing consistent
//! error response formatting across the API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - NotFound → 404 NOT_FOUND
    /// - Duplicate, Conflict → 409 CONFLICT
    /// - Validation, ValidationErrors, BadRequest → 400 BAD_REQUEST
    /// - UnprocessableContent → 422 UNPROCESSABLE_ENTITY
    /// - Unauthorized → 401 UNAUTHORIZED
    /// - Forbidden → 403 FORBIDDEN
    /// - Database, Configuration, Internal → 500 INTERNAL_SERVER_ERROR
    /// - ConnectionPool → 503 SERVICE_UNAVAILABLE
    ///
    /// A copy of the error body is stored in the response extensions so the
    /// request ID middleware can stamp the correlation ID into it.
    fn into_response(self) -> Response {
        let (status, error_response) = response_parts(&self);
        let mut response = (status, Json(&error_response)).into_response();
        response.extensions_mut().insert(error_response);
        response
    }
}

/// Maps an error to its HTTP status code and serializable body.
fn response_parts(error: &AppError) -> (StatusCode, ErrorResponse) {
    match error {
        AppError::NotFound {
            entity,
            field,
            value,
        } => (
            StatusCode::NOT_FOUND,
            ErrorResponse::not_found_error(entity, field, value),
        ),
        AppError::Duplicate {
            entity,
            field,
            value,
        } => (
            StatusCode::CONFLICT,
            ErrorResponse::duplicate_error(entity, field, value),
        ),
        AppError::Validation { field, reason } => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::validation_error(field, reason),
        ),
        AppError::ValidationErrors { errors } => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("VALIDATION_ERROR", "Request validation failed")
                .with_details(json!({ "errors": errors })),
        ),
        AppError::BadRequest { message } => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("BAD_REQUEST", message),
        ),
        AppError::Conflict { message } => (
            StatusCode::CONFLICT,
            ErrorResponse::new("CONFLICT", message),
        ),
        AppError::UnprocessableContent { message } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorResponse::new("UNPROCESSABLE_CONTENT", message),
        ),
        AppError::Unauthorized { message } => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new("UNAUTHORIZED", message),
        ),
        AppError::Forbidden { message } => (
            StatusCode::FORBIDDEN,
            ErrorResponse::new("FORBIDDEN", message),
        ),
        AppError::Database { operation, source } => {
            error!(operation = %operation, error = %source, "database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(
                    "DATABASE_ERROR",
                    &format!("Database operation failed: {}", operation),
                )
                .with_details(json!({ "operation": operation })),
            )
        }
        AppError::Configuration { key, source } => {
            error!(key = %key, error = %source, "configuration error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("CONFIGURATION_ERROR", &format!("Configuration error: {}", key))
                    .with_details(json!({ "key": key })),
            )
        }
        AppError::ConnectionPool { source } => {
            error!(error = %source, "connection pool error");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::new("SERVICE_UNAVAILABLE", "Database connection unavailable"),
            )
        }
        AppError::Internal { source } => {
            error!(error = %source, "internal error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred"),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            status_of(AppError::NotFound {
                entity: "court".into(),
                field: "id".into(),
                value: "1".into(),
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Conflict {
                message: "slot taken".into()
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::UnprocessableContent {
                message: "bad transition".into()
            }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(AppError::Unauthorized {
                message: "no token".into()
            }),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Forbidden {
                message: "admin only".into()
            }),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(AppError::Internal {
                source: anyhow::anyhow!("boom")
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_body_copy_stored_in_extensions() {
        let response = AppError::NotFound {
            entity: "court".into(),
            field: "id".into(),
            value: "7".into(),
        }
        .into_response();

        let body = response
            .extensions()
            .get::<ErrorResponse>()
            .expect("error responses carry their body in the extensions");
        assert_eq!(body.code, "NOT_FOUND");
        assert!(body.request_id.is_none());
    }
}
