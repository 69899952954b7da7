//! Products API - REST server

use axum_helpers::{close_postgres, create_production_app};
use core_config::tracing::{init_tracing, install_color_eyre};
use migration::Migrator;
use products_api::{build_app, config::Config, state::AppState};
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");
    let db =
        database::postgres::connect_from_config_with_retry(config.postgres.clone(), None).await?;
    database::postgres::run_migrations::<Migrator>(&db, config.app.name).await?;

    let state = AppState { config, db };
    let app = build_app(&state)?;

    info!(
        "Starting {} v{} on port {}",
        state.config.app.name, state.config.app.version, state.config.server.port
    );

    let AppState { config, db } = state;
    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing PostgreSQL connections");
        close_postgres(db, "products").await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
