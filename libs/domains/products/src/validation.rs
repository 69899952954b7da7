//! Request rules for the product routes.
//!
//! Messages are client-facing and stay in Spanish.

use axum_helpers::validation::{FieldRule, ValidationChain, body, numeric_value, param};
use serde_json::Value;

pub const INVALID_ID: &str = "ID no valido";
pub const EMPTY_NAME: &str = "El nombre del producto no puede ir vacio";
pub const INVALID_VALUE: &str = "Valor no valido";
pub const EMPTY_PRICE: &str = "El precio del producto no puede ir vacio";
pub const INVALID_PRICE: &str = "Precio no valido";
pub const INVALID_AVAILABILITY: &str = "Valor para disponibilidad no valido";

fn id() -> FieldRule {
    param("id").is_int(INVALID_ID)
}

fn name() -> FieldRule {
    body("name").not_empty(EMPTY_NAME)
}

fn price() -> FieldRule {
    body("price")
        .is_numeric(INVALID_VALUE)
        .not_empty(EMPTY_PRICE)
        .custom(is_positive, INVALID_PRICE)
}

fn availability() -> FieldRule {
    body("availability").is_boolean(INVALID_AVAILABILITY)
}

fn is_positive(value: &Value) -> bool {
    numeric_value(value).is_some_and(|price| price > 0.0)
}

/// `GET` and `DELETE` on `/{id}`
pub fn by_id() -> ValidationChain {
    ValidationChain::new().rule(id())
}

/// `POST /`
pub fn create() -> ValidationChain {
    ValidationChain::new().rule(name()).rule(price())
}

/// `PUT /{id}`
pub fn update() -> ValidationChain {
    ValidationChain::new()
        .rule(id())
        .rule(name())
        .rule(price())
        .rule(availability())
}

/// `PATCH /{id}`
pub fn set_availability() -> ValidationChain {
    ValidationChain::new()
        .rule(id())
        .rule(availability().optional())
}
