//! Integer path parameter extractor.

use crate::validation::ValidationErrors;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

pub const INVALID_ID_MESSAGE: &str = "ID no valido";

/// Extracts a single `i32` path parameter.
///
/// A missing or non-integer segment rejects with a `400` validation body for
/// field `id`.
///
/// ```ignore
/// async fn get_product(IdPath(id): IdPath) -> String {
///     format!("Product {id}")
/// }
///
/// let app = Router::new().route("/products/{id}", get(get_product));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ValidationErrors;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let invalid = || ValidationErrors::single("id", INVALID_ID_MESSAGE);

        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid())?;

        raw.parse::<i32>().map(IdPath).map_err(|_| invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    async fn show(IdPath(id): IdPath) -> String {
        id.to_string()
    }

    async fn status_for(uri: &str) -> StatusCode {
        Router::new()
            .route("/products/{id}", get(show))
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_id_path_parses_integers() {
        assert_eq!(status_for("/products/42").await, StatusCode::OK);
        assert_eq!(status_for("/products/-1").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_id_path_rejects_non_integers() {
        assert_eq!(status_for("/products/abc").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for("/products/1.5").await, StatusCode::BAD_REQUEST);
    }
}
