//! Products API - REST server over PostgreSQL
//!
//! The binary in `main.rs` wires configuration, the database and graceful
//! shutdown around the router built here.

pub mod api;
pub mod config;
pub mod openapi;
pub mod state;

use axum::Router;
use axum_helpers::{create_cors_layer, create_router, health_router};
use domain_products::{PgProductRepository, ProductRepository, ProductService};

use state::AppState;

/// `/api` routes and `probes` plus docs, the JSON 404 fallback, tracing and
/// CORS.
pub fn api_router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    probes: Router,
    allowed_origin: &str,
) -> eyre::Result<Router> {
    let cors = create_cors_layer(allowed_origin)?;
    Ok(create_router::<openapi::ApiDoc>(
        api::routes(service),
        probes,
        cors,
    ))
}

/// Full application: [`api_router`] on PostgreSQL with `/health` and `/ready`.
pub fn build_app(state: &AppState) -> eyre::Result<Router> {
    let service = ProductService::new(PgProductRepository::new(state.db.clone()));
    let probes = health_router(state.config.app).merge(api::health::router(state.db.clone()));

    api_router(service, probes, &state.config.cors.allowed_origin)
}
