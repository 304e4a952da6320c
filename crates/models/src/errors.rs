use std::fmt;

use thiserror::Error;

/// Input field a validation failure is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The request body as a whole (missing or unparseable).
    Body,
    Name,
    Quantity,
    Price,
}

impl Field {
    pub fn key(self) -> &'static str {
        match self {
            Field::Body => "body",
            Field::Name => "name",
            Field::Quantity => "quantity",
            Field::Price => "price",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    Missing,
    /// Wrong type, blank name, or not convertible to a number.
    Invalid,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", self.message())]
pub struct ValidationError {
    pub field: Field,
    pub kind: ValidationKind,
}

impl ValidationError {
    pub fn new(field: Field, kind: ValidationKind) -> Self {
        Self { field, kind }
    }

    pub fn missing(field: Field) -> Self { Self::new(field, ValidationKind::Missing) }
    pub fn invalid(field: Field) -> Self { Self::new(field, ValidationKind::Invalid) }
    pub fn negative(field: Field) -> Self { Self::new(field, ValidationKind::Negative) }

    pub fn message(&self) -> String {
        use ValidationKind::*;
        let key = self.field.key();
        match (self.field, self.kind) {
            (Field::Body, _) => "empty request: no data was sent".to_string(),
            (_, Missing) => format!("parameter \"{key}\" not provided"),
            (Field::Name, _) => format!("parameter \"{key}\" is invalid or empty"),
            (Field::Quantity, Invalid) => format!("parameter \"{key}\" is not a valid integer"),
            (Field::Quantity, Negative) => format!("parameter \"{key}\" must be a non-negative integer"),
            (Field::Price, Invalid) => format!("parameter \"{key}\" is not a valid number"),
            (Field::Price, Negative) => format!("parameter \"{key}\" must be a non-negative number"),
        }
    }
}
