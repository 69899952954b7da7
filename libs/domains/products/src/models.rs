use axum_helpers::validation::{boolean_value, numeric_value};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Assigned by storage, starting at 1
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Monitor curvo de 49 pulgadas")]
    pub name: String,
    /// Always greater than zero. Whole amounts serialize as integers.
    #[serde(serialize_with = "serialize_price")]
    #[schema(example = 300)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
}

/// Body of `POST /api/products`. New products start out available.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "El nombre del producto no puede ir vacio"))]
    #[schema(example = "Monitor curvo de 49 pulgadas")]
    pub name: String,
    #[validate(range(exclusive_min = 0.0, message = "Precio no valido"))]
    #[serde(deserialize_with = "deserialize_price")]
    #[schema(example = 300)]
    pub price: f64,
}

/// Body of `PUT /api/products/{id}`; replaces every mutable field.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, message = "El nombre del producto no puede ir vacio"))]
    #[schema(example = "Monitor curvo de 49 pulgadas")]
    pub name: String,
    #[validate(range(exclusive_min = 0.0, message = "Precio no valido"))]
    #[serde(deserialize_with = "deserialize_price")]
    #[schema(example = 400)]
    pub price: f64,
    #[serde(deserialize_with = "deserialize_availability")]
    #[schema(example = true)]
    pub availability: bool,
}

/// Optional body of `PATCH /api/products/{id}`.
///
/// Without `availability` the flag is toggled.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityUpdate {
    #[serde(default, deserialize_with = "deserialize_optional_availability")]
    #[schema(example = false)]
    pub availability: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteConfirmation {
    #[schema(example = "Producto Eliminado")]
    pub message: String,
}

impl DeleteConfirmation {
    pub const MESSAGE: &'static str = "Producto Eliminado";

    pub fn new() -> Self {
        Self {
            message: Self::MESSAGE.to_string(),
        }
    }
}

impl Default for DeleteConfirmation {
    fn default() -> Self {
        Self::new()
    }
}

/// Prices arrive as JSON numbers or decimal strings (`"100"`).
fn deserialize_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    numeric_value(&value).ok_or_else(|| D::Error::custom(format!("invalid price: {value}")))
}

/// Availability arrives as a JSON boolean or `"true"` / `"false"`.
fn deserialize_availability<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    boolean_value(&value).ok_or_else(|| D::Error::custom(format!("invalid availability: {value}")))
}

fn deserialize_optional_availability<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<bool>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => boolean_value(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid availability: {value}"))),
    }
}

fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if price.fract() == 0.0 && price.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{EMPTY_NAME, INVALID_PRICE};

    #[test]
    fn test_validator_messages_match_request_rules() {
        let input = CreateProduct {
            name: String::new(),
            price: 0.0,
        };
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();

        assert_eq!(fields["name"][0].message.as_deref(), Some(EMPTY_NAME));
        assert_eq!(fields["price"][0].message.as_deref(), Some(INVALID_PRICE));
    }

    #[test]
    fn test_update_product_accepts_positive_price() {
        let input = UpdateProduct {
            name: "Teclado".into(),
            price: 0.01,
            availability: false,
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_string_price_and_availability_are_coerced() {
        let input: UpdateProduct = serde_json::from_value(serde_json::json!({
            "name": "Mouse",
            "price": "100.5",
            "availability": "false"
        }))
        .unwrap();
        assert_eq!(input.price, 100.5);
        assert!(!input.availability);

        let input: CreateProduct =
            serde_json::from_value(serde_json::json!({"name": "Mouse", "price": "100"})).unwrap();
        assert_eq!(input.price, 100.0);

        let update: AvailabilityUpdate =
            serde_json::from_value(serde_json::json!({"availability": "true"})).unwrap();
        assert_eq!(update.availability, Some(true));
    }

    #[test]
    fn test_unparseable_price_is_rejected() {
        let result: Result<CreateProduct, _> =
            serde_json::from_value(serde_json::json!({"name": "Mouse", "price": "cien"}));
        assert!(result.is_err());

        let result: Result<UpdateProduct, _> = serde_json::from_value(
            serde_json::json!({"name": "Mouse", "price": 1, "availability": "yes"}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_whole_prices_serialize_as_integers() {
        let product = Product {
            id: 1,
            name: "Monitor curvo".into(),
            price: 100.0,
            availability: true,
        };
        assert_eq!(
            serde_json::to_value(&product).unwrap(),
            serde_json::json!({"id": 1, "name": "Monitor curvo", "price": 100, "availability": true})
        );

        let product = Product { price: 99.9, ..product };
        assert_eq!(serde_json::to_value(&product).unwrap()["price"], serde_json::json!(99.9));
    }

    #[test]
    fn test_availability_update_defaults_to_toggle() {
        let update: AvailabilityUpdate = serde_json::from_str("{}").unwrap();
        assert_eq!(update.availability, None);
    }
}
