use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::errors::ErrorCode;

/// One failed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "price")]
    pub field: String,
    #[schema(example = "Precio no valido")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every failed check of a request, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![FieldError::new(field, message)])
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.field.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed for ")?;
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoResponse for ValidationErrors {
    fn into_response(self) -> Response {
        tracing::info!(
            error_code = ErrorCode::ValidationError.code(),
            fields = ?self.fields().collect::<Vec<_>>(),
            "Validation error"
        );
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

/// Flattens `validator` output, using the rule message when one is set and
/// the rule code otherwise. Fields are sorted so responses are stable.
impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut entries = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                entries.push(FieldError::new(field.to_string(), message));
            }
        }
        entries.sort_by(|a, b| a.field.cmp(&b.field));
        Self::new(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Draft {
        #[validate(length(min = 1, message = "name required"))]
        name: String,
        #[validate(range(min = 1))]
        quantity: i32,
    }

    #[test]
    fn test_from_validator_errors() {
        let draft = Draft {
            name: String::new(),
            quantity: 0,
        };
        let errors: ValidationErrors = draft.validate().unwrap_err().into();

        assert_eq!(
            errors.errors,
            vec![
                FieldError::new("name", "name required"),
                FieldError::new("quantity", "range"),
            ]
        );
    }

    #[test]
    fn test_display_lists_fields() {
        let errors = ValidationErrors::new(vec![
            FieldError::new("id", "ID no valido"),
            FieldError::new("price", "Precio no valido"),
        ]);
        assert_eq!(
            errors.to_string(),
            "validation failed for id: ID no valido, price: Precio no valido"
        );
        assert_eq!(errors.len(), 2);
    }
}
