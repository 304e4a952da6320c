use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    Json,
};
use common::types::Message;
use models::{errors::{Field, ValidationError}, product::Product};
use serde_json::Value;
use service::errors::ServiceError;
use tracing::debug;

use crate::errors::JsonApiError;
use crate::routes::AppState;

pub const DELETED_MESSAGE: &str = "Product deleted successfully";

/// A non-integer id never names a product.
fn product_id(id: Result<Path<u64>, PathRejection>) -> Result<u64, JsonApiError> {
    id.map(|Path(id)| id).map_err(|e| {
        debug!(error = %e, "unparseable product id");
        JsonApiError::product_not_found()
    })
}

fn no_data() -> JsonApiError {
    JsonApiError::from(ServiceError::from(ValidationError::missing(Field::Body)))
}

/// Missing, non-JSON, malformed or `null` bodies all count as "no data sent".
fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, JsonApiError> {
    match body {
        Ok(Json(Value::Null)) => Err(no_data()),
        Ok(Json(v)) => Ok(v),
        Err(e) => {
            debug!(error = %e, "request body rejected");
            Err(no_data())
        }
    }
}

/// List all products
#[utoipa::path(get, path = "/products", tag = "products", responses(
    (status = 200, description = "All products in storage order", body = [Product]),
    (status = 500, description = "Backing store unreadable", body = crate::openapi::ErrorBody),
))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, JsonApiError> {
    Ok(Json(state.products.list().await?))
}

/// Fetch one product
#[utoipa::path(get, path = "/products/{id}", tag = "products",
    params(("id" = u64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Found", body = Product),
        (status = 404, description = "No product with this id", body = crate::openapi::ErrorBody),
    ))]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Product>, JsonApiError> {
    let id = product_id(id)?;
    Ok(Json(state.products.get(id).await?))
}

/// Create a product; the id is assigned by the server
#[utoipa::path(post, path = "/products", tag = "products",
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 201, description = "Created", body = Product),
        (status = 400, description = "Validation error", body = crate::openapi::ErrorBody),
        (status = 500, description = "Could not persist", body = crate::openapi::ErrorBody),
    ))]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), JsonApiError> {
    let input = json_body(body)?;
    let product = state.products.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update the supplied fields of a product
#[utoipa::path(put, path = "/products/{id}", tag = "products",
    params(("id" = u64, Path, description = "Product id")),
    request_body = crate::openapi::ProductPatchDoc,
    responses(
        (status = 200, description = "Updated", body = Product),
        (status = 400, description = "Validation error", body = crate::openapi::ErrorBody),
        (status = 404, description = "No product with this id", body = crate::openapi::ErrorBody),
        (status = 500, description = "Could not persist", body = crate::openapi::ErrorBody),
    ))]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Product>, JsonApiError> {
    let id = product_id(id)?;
    let input = json_body(body)?;
    Ok(Json(state.products.update(id, input).await?))
}

/// Delete a product
#[utoipa::path(delete, path = "/products/{id}", tag = "products",
    params(("id" = u64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Deleted", body = Message),
        (status = 404, description = "No product with this id", body = crate::openapi::ErrorBody),
        (status = 500, description = "Could not persist", body = crate::openapi::ErrorBody),
    ))]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Message>, JsonApiError> {
    let id = product_id(id)?;
    state.products.delete(id).await?;
    Ok(Json(Message::new(DELETED_MESSAGE)))
}
