//! Products Domain
//!
//! CRUD over a single `products` table.
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, request rules
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← not-found mapping, input validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + PostgreSQL and in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product and request DTOs
//! └─────────────┘
//! ```
//!
//! ```ignore
//! use domain_products::{PgProductRepository, ProductService, handlers};
//!
//! let service = ProductService::new(PgProductRepository::new(db));
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validation;

pub use error::{NOT_FOUND_MESSAGE, ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{AvailabilityUpdate, CreateProduct, DeleteConfirmation, Product, UpdateProduct};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
