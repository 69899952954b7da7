use tracing::{error, info};

/// Closes a SeaORM pool, logging the outcome.
pub async fn close_postgres(db: sea_orm::DatabaseConnection, name: &str) {
    match db.close().await {
        Ok(_) => info!(pool = name, "PostgreSQL connection closed"),
        Err(e) => error!(pool = name, error = %e, "Error closing PostgreSQL connection"),
    }
}
