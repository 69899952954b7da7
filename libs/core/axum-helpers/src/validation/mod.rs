//! Declarative request validation.
//!
//! A [`ValidationChain`] is a list of per-field rules. Each rule reads one
//! value from the path parameters or the JSON body and runs its checks in
//! order; every failing check contributes one [`FieldError`]. The
//! [`validate_request`] middleware runs a chain before the handler and
//! short-circuits with `400 {"errors": [...]}` when anything fails.
//!
//! ```ignore
//! use axum::{middleware, routing::put};
//! use axum_helpers::validation::{ValidationChain, body, param, validate_request};
//!
//! let rules = Arc::new(
//!     ValidationChain::new()
//!         .rule(param("id").is_int("ID no valido"))
//!         .rule(body("name").not_empty("El nombre no puede ir vacio")),
//! );
//! let route = put(handler).layer(middleware::from_fn_with_state(rules, validate_request));
//! ```

mod chain;
mod errors;
mod middleware;

pub use chain::{
    FieldRule, RequestInput, Source, ValidationChain, body, boolean_value, numeric_value, param,
};
pub use errors::{FieldError, ValidationErrors};
pub use middleware::{
    INVALID_JSON_MESSAGE, MAX_BODY_BYTES, has_json_content_type, validate_request,
};
