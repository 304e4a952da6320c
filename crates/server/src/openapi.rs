use axum::Json;
use utoipa::OpenApi;
use utoipa::ToSchema;

use common::types::Message;
use models::product::Product;

#[derive(ToSchema)]
pub struct ErrorBody {
    /// Human-readable message
    pub error: String,
    /// `validation_error`, `not_found`, `storage_read_error` or `storage_write_error`
    pub kind: String,
    /// Offending input field, validation errors only
    pub field: Option<String>,
}

/// Numbers may also be sent as numeric strings.
#[derive(ToSchema)]
pub struct ProductInputDoc {
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

#[derive(ToSchema)]
pub struct ProductPatchDoc {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::root,
        crate::routes::health,
        crate::routes::products::list,
        crate::routes::products::get,
        crate::routes::products::create,
        crate::routes::products::update,
        crate::routes::products::delete,
    ),
    components(
        schemas(
            Product,
            Message,
            ErrorBody,
            ProductInputDoc,
            ProductPatchDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "products", description = "Inventory CRUD"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
