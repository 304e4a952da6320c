use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Error response rendered as `{"error": message, "kind": kind}`, plus
/// `"field"` for validation failures.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
    pub field: Option<&'static str>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        Self { status, kind, message: message.into(), field: None }
    }

    pub fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    pub fn product_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", PRODUCT_NOT_FOUND)
    }

    pub fn route_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", "Not Found")
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let kind = e.kind();
        match e {
            ServiceError::Validation(v) => {
                Self::new(StatusCode::BAD_REQUEST, kind, v.message()).with_field(v.field.key())
            }
            ServiceError::NotFound(_) => Self::product_not_found(),
            ServiceError::StorageRead { .. } => {
                error!(error = %e, "backing store unreadable");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, kind, "unable to read the stored data")
            }
            ServiceError::StorageWrite { .. } => {
                error!(error = %e, "backing store write failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, kind, "unable to save the data")
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let mut body = serde_json::json!({"error": self.message, "kind": self.kind});
        if let Some(field) = self.field {
            body["field"] = field.into();
        }
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("backing store check failed: {0}")]
    Storage(#[from] ServiceError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
