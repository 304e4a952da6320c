use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::errors::{Field, ValidationError};

/// A stock-keeping record as stored on disk and returned over HTTP.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

/// Validated create input. The id is assigned by the store.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

/// Validated partial update; `None` means "leave unchanged".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
}

impl NewProduct {
    /// Validate a raw JSON body. Checks run name, quantity, price; the first
    /// failure is returned.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let fields = body.as_object();
        let name = validate_name(required(fields, Field::Name)?)?;
        let quantity = validate_quantity(required(fields, Field::Quantity)?)?;
        let price = validate_price(required(fields, Field::Price)?)?;
        Ok(Self { name, quantity, price })
    }

    pub fn into_product(self, id: u64) -> Product {
        Product { id, name: self.name, quantity: self.quantity, price: self.price }
    }
}

impl ProductPatch {
    /// Validate only the fields present in `body`, in the same order as create.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let fields = body.as_object();
        Ok(Self {
            name: lookup(fields, Field::Name).map(validate_name).transpose()?,
            quantity: lookup(fields, Field::Quantity).map(validate_quantity).transpose()?,
            price: lookup(fields, Field::Price).map(validate_price).transpose()?,
        })
    }

    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
    }
}

/// Next id for a collection: one past the largest existing id, or 1 when empty.
/// `None` once the largest id is `u64::MAX`.
pub fn next_id(products: &[Product]) -> Option<u64> {
    products.iter().map(|p| p.id).max().unwrap_or(0).checked_add(1)
}

fn lookup<'a>(fields: Option<&'a Map<String, Value>>, field: Field) -> Option<&'a Value> {
    fields.and_then(|m| m.get(field.key()))
}

fn required<'a>(fields: Option<&'a Map<String, Value>>, field: Field) -> Result<&'a Value, ValidationError> {
    lookup(fields, field).ok_or_else(|| ValidationError::missing(field))
}

pub fn validate_name(value: &Value) -> Result<String, ValidationError> {
    match value.as_str().map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(ValidationError::invalid(Field::Name)),
    }
}

pub fn validate_quantity(value: &Value) -> Result<i64, ValidationError> {
    let quantity = coerce_integer(value).ok_or_else(|| ValidationError::invalid(Field::Quantity))?;
    if quantity < 0 {
        return Err(ValidationError::negative(Field::Quantity));
    }
    Ok(quantity)
}

pub fn validate_price(value: &Value) -> Result<f64, ValidationError> {
    let price = coerce_float(value).ok_or_else(|| ValidationError::invalid(Field::Price))?;
    if price < 0.0 {
        return Err(ValidationError::negative(Field::Price));
    }
    Ok(price)
}

/// Integers pass through, floats truncate toward zero, strings are trimmed and
/// parsed. Anything else (bool, null, containers) is rejected.
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            if n.is_u64() {
                // beyond i64::MAX
                return None;
            }
            let t = n.as_f64()?.trunc();
            let in_range = t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64;
            in_range.then_some(t as i64)
        }
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Non-finite values are refused since they cannot be written back as JSON.
fn coerce_float(value: &Value) -> Option<f64> {
    let f = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    f.is_finite().then_some(f)
}
