//! JSON body extractor for endpoints where the body may be left out.

use crate::errors::AppError;
use crate::validation::{INVALID_JSON_MESSAGE, ValidationErrors, has_json_content_type};
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// `Some(T)` for a non-empty body sent as JSON, `None` for an empty body or
/// any other content type.
///
/// This matches what [`validate_request`](crate::validation::validate_request)
/// treats as "no body fields". A JSON body that does not deserialize into `T`
/// rejects with the `body` field error the middleware uses.
#[derive(Debug, Clone, Default)]
pub struct OptionalJson<T>(pub Option<T>);

impl<T, S> FromRequest<S> for OptionalJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Ok(Self(None));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(format!("Request body could not be read: {e}")))?;
        if bytes.is_empty() {
            return Ok(Self(None));
        }

        serde_json::from_slice(&bytes)
            .map(|value| Self(Some(value)))
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejecting JSON body of the wrong shape");
                ValidationErrors::single("body", INVALID_JSON_MESSAGE).into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, routing::patch};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use serde_json::Value;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Flag {
        on: bool,
    }

    async fn describe(OptionalJson(flag): OptionalJson<Flag>) -> String {
        match flag {
            Some(flag) => flag.on.to_string(),
            None => "none".to_string(),
        }
    }

    async fn send(content_type: Option<&str>, body: &str) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method("PATCH").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let response = Router::new()
            .route("/", patch(describe))
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_json_body_is_parsed() {
        assert_eq!(
            send(Some("application/json"), r#"{"on":true}"#).await,
            (StatusCode::OK, b"true".to_vec())
        );
    }

    #[tokio::test]
    async fn test_missing_or_foreign_bodies_are_none() {
        for (content_type, body) in [
            (None, ""),
            (None, r#"{"on":true}"#),
            (Some("application/json"), ""),
            (Some("text/plain"), "hello"),
        ] {
            assert_eq!(
                send(content_type, body).await,
                (StatusCode::OK, b"none".to_vec()),
                "{content_type:?} {body:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_wrong_shape_is_a_json_body_error() {
        let (status, bytes) = send(Some("application/json"), r#"{"on":"maybe"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["errors"][0]["field"], "body");
        assert_eq!(body["errors"][0]["message"], INVALID_JSON_MESSAGE);
    }
}
