//! PostgreSQL connectivity for the products service.
//!
//! - [`postgres`] builds a SeaORM pool from [`postgres::PostgresConfig`], runs
//!   migrations and answers readiness probes.
//! - [`common`] holds the shared error type and the retry helper used while
//!   the database is still coming up.
//!
//! The `config` feature implements `core_config::FromEnv` for the config types.
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config_with_retry(config, None).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "products_api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
