//! Server infrastructure: router assembly with API docs, liveness and
//! readiness endpoints, and graceful shutdown with connection cleanup.
//!
//! ```ignore
//! let router = create_router::<ApiDoc>(api_routes, health_router(app_info!()), cors_layer);
//!
//! create_production_app(router, &server_config, Duration::from_secs(30), async move {
//!     close_postgres(db, "products").await;
//! })
//! .await?;
//! ```

pub mod app;
pub mod cleanup;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router};
pub use cleanup::close_postgres;
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::ShutdownCoordinator;
