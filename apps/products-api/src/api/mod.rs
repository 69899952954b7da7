//! API routes module

pub mod health;

use axum::{routing::get, Json, Router};
use domain_products::{handlers, ProductRepository, ProductService};
use serde_json::{json, Value};

/// Routes mounted under `/api`
pub fn routes<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/products", handlers::router(service))
}

async fn root() -> Json<Value> {
    Json(json!({ "msg": "Desde API" }))
}
