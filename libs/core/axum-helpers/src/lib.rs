//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! - **[`server`]**: router assembly with API docs, health checks, graceful shutdown
//! - **[`http`]**: CORS
//! - **[`errors`]**: JSON error bodies and the [`AppError`] type
//! - **[`validation`]**: declarative per-field request validation middleware
//! - **[`extractors`]**: integer path ids, validated and optional JSON bodies

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;
pub mod validation;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, close_postgres,
    create_production_app, create_router, health_router, run_health_checks,
};

pub use http::create_cors_layer;

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{IdPath, OptionalJson, ValidatedJson};

pub use validation::{FieldError, ValidationChain, ValidationErrors, validate_request};
