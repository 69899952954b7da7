//! JSON extractor that runs `validator` rules after deserializing.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// `Json<T>` followed by `T::validate()`.
///
/// Deserialization failures reject through [`AppError::JsonExtractorRejection`];
/// rule failures reject with the `{"errors": [...]}` validation body.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()
            .map_err(|e| AppError::Validation(e.into()))?;
        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use serde_json::Value;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct NewTag {
        #[validate(length(min = 2, message = "too short"))]
        label: String,
    }

    async fn create(ValidatedJson(tag): ValidatedJson<NewTag>) -> String {
        tag.label
    }

    async fn send(body: &str) -> (StatusCode, Vec<u8>) {
        let response = Router::new()
            .route("/", post(create))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_valid_payload_passes() {
        let (status, body) = send(r#"{"label":"sale"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"sale");
    }

    #[tokio::test]
    async fn test_rule_failure_uses_field_errors() {
        let (status, body) = send(r#"{"label":"x"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["errors"][0]["field"], "label");
        assert_eq!(body["errors"][0]["message"], "too short");
    }

    #[tokio::test]
    async fn test_wrong_shape_is_bad_request() {
        let (status, body) = send(r#"{"label":7}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["code"], "JSON_EXTRACTION");
    }
}
