use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::error::ApiError;

/// `Json<T>` that reports unreadable bodies through `ApiError`, so clients always get the
/// structured error body. Oversized bodies keep their 413; every other rejection is a 422.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_api_error)?;
        Ok(AppJson(value))
    }
}

fn rejection_to_api_error(rejection: JsonRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::payload_too_large("Request body is too large");
    }

    let mut field_errors = HashMap::new();
    field_errors.insert("body".to_string(), rejection.body_text());
    ApiError::unprocessable_entity("Invalid request body", field_errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde_json::Value;

    fn json_request(body: impl Into<Body>) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap()
    }

    #[tokio::test]
    async fn oversized_body_is_413() {
        // Past axum's default 2MB buffering limit
        let body = vec![b' '; 3 * 1024 * 1024];
        let err = AppJson::<Value>::from_request(json_request(body), &()).await.err().unwrap();
        assert!(matches!(err, ApiError::PayloadTooLarge(_)));
        assert_eq!(err.status_code(), 413);
    }

    #[tokio::test]
    async fn malformed_body_is_422() {
        let err = AppJson::<Value>::from_request(json_request("{\"pokedex\": "), &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status_code(), 422);
    }

    #[tokio::test]
    async fn missing_content_type_is_422() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from("{}"))
            .unwrap();
        let err = AppJson::<Value>::from_request(request, &()).await.err().unwrap();
        assert_eq!(err.status_code(), 422);
    }

    #[tokio::test]
    async fn valid_body_parses() {
        let AppJson(value) = AppJson::<Value>::from_request(json_request("{\"a\": 1}"), &())
            .await
            .ok()
            .unwrap();
        assert_eq!(value["a"], 1);
    }
}
