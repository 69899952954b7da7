use axum::{
    body::Body,
    extract::{FromRequestParts, RawPathParams, Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::sync::Arc;

use super::{RequestInput, ValidationChain, ValidationErrors};
use crate::errors::AppError;

/// Largest body the middleware buffers for inspection.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

pub const INVALID_JSON_MESSAGE: &str = "JSON no valido";

/// Runs `chain` against the request and forwards it untouched when every
/// rule passes.
///
/// The body is buffered and parsed only when the request declares a JSON
/// content type; anything else is treated as having no body fields. A JSON
/// body that fails to parse is reported as a `body` field error.
pub async fn validate_request(
    State(chain): State<Arc<ValidationChain>>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    let mut input = RequestInput::new();
    if let Ok(params) = RawPathParams::from_request_parts(&mut parts, &()).await {
        for (name, value) in &params {
            input = input.with_param(name, value);
        }
    }

    let bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return AppError::BadRequest(format!("Request body could not be read: {e}"))
                .into_response();
        }
    };

    if has_json_content_type(&parts.headers) && !bytes.is_empty() {
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(value) => input = input.with_body(value),
            Err(e) => {
                tracing::debug!(error = %e, "Rejecting malformed JSON body");
                return ValidationErrors::single("body", INVALID_JSON_MESSAGE).into_response();
            }
        }
    }

    if let Err(errors) = chain.validate(&input) {
        return errors.into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// `application/json` or any `application/*+json` media type.
pub fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{body, param};
    use axum::{
        Router,
        http::{HeaderValue, StatusCode},
        middleware,
        routing::put,
    };
    use http_body_util::BodyExt;
    use axum::body::Bytes;
    use serde_json::json;
    use tower::ServiceExt;

    async fn echo(body: String) -> String {
        body
    }

    fn app() -> Router {
        let rules = Arc::new(
            ValidationChain::new()
                .rule(param("id").is_int("ID no valido"))
                .rule(body("name").not_empty("vacio")),
        );

        Router::new().route(
            "/items/{id}",
            put(echo).layer(middleware::from_fn_with_state(rules, validate_request)),
        )
    }

    fn request(uri: &str, content_type: Option<&str>, body: &str) -> Request {
        let mut builder = Request::builder().method("PUT").uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn read(response: Response) -> (StatusCode, Bytes) {
        let status = response.status();
        (status, response.into_body().collect().await.unwrap().to_bytes())
    }

    #[tokio::test]
    async fn test_valid_request_reaches_handler_with_body_intact() {
        let raw = r#"{"name":"Teclado"}"#;
        let response = app()
            .oneshot(request("/items/4", Some("application/json"), raw))
            .await
            .unwrap();

        let (status, bytes) = read(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bytes, raw.as_bytes());
    }

    #[tokio::test]
    async fn test_failures_from_path_and_body_are_combined() {
        let response = app()
            .oneshot(request("/items/abc", Some("application/json"), r#"{"name":""}"#))
            .await
            .unwrap();

        let (status, bytes) = read(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({"errors": [
                {"field": "id", "message": "ID no valido"},
                {"field": "name", "message": "vacio"}
            ]})
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_body_error() {
        let response = app()
            .oneshot(request("/items/1", Some("application/json"), "{not json"))
            .await
            .unwrap();

        let (status, bytes) = read(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["errors"][0]["field"], "body");
        assert_eq!(body["errors"][0]["message"], INVALID_JSON_MESSAGE);
    }

    #[tokio::test]
    async fn test_non_json_body_has_no_fields() {
        let response = app()
            .oneshot(request("/items/1", Some("text/plain"), r#"{"name":"x"}"#))
            .await
            .unwrap();

        let (status, bytes) = read(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["errors"][0]["field"], "name");
    }

    #[test]
    fn test_json_content_type_detection() {
        let mut headers = HeaderMap::new();
        assert!(!has_json_content_type(&headers));

        for (value, expected) in [
            ("application/json", true),
            ("application/json; charset=utf-8", true),
            ("Application/JSON", true),
            ("application/merge-patch+json", true),
            ("text/plain", false),
            ("application/x-www-form-urlencoded", false),
        ] {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(value));
            assert_eq!(has_json_content_type(&headers), expected, "{value}");
        }
    }
}
