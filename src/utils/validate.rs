use crate::error::{AppError, AppResult};
use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that runs declarative validation on the deserialized
/// payload before the handler sees it.
///
/// Deserialization failures become `BadRequest`; validation failures become
/// `ValidationErrors` with one entry per offending field.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Query-string extractor with the same validation behavior as
/// [`ValidatedJson`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest {
                message: rejection.body_text(),
            })?;
        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct TestPayload {
        #[validate(length(min = 1, message = "Name cannot be empty"))]
        name: String,
        #[validate(range(min = 1, max = 30, message = "Capacity must be between 1 and 30"))]
        capacity: i32,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_payload() {
        let request = json_request(r#"{"name": "Court 1", "capacity": 4}"#);
        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;

        assert!(result.is_ok());
        let ValidatedJson(payload) = result.unwrap();
        assert_eq!(payload.name, "Court 1");
        assert_eq!(payload.capacity, 4);
    }

    #[tokio::test]
    async fn test_validation_error() {
        let request = json_request(r#"{"name": "", "capacity": 50}"#);
        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;

        assert!(result.is_err());
        match result.unwrap_err() {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 2);
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"name"));
                assert!(fields.contains(&"capacity"));
            }
            other => panic!("Expected ValidationErrors error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_query_extraction_and_validation() {
        let request = Request::builder()
            .method(Method::GET)
            .uri("/test?name=Court%201&capacity=4")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let ValidatedQuery(payload) =
            ValidatedQuery::<TestPayload>::from_request_parts(&mut parts, &())
                .await
                .unwrap();
        assert_eq!(payload.name, "Court 1");

        let request = Request::builder()
            .method(Method::GET)
            .uri("/test?name=&capacity=99")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        let result = ValidatedQuery::<TestPayload>::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::ValidationErrors { .. })));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let request = json_request("{not json");
        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;

        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }
}
