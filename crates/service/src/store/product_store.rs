use async_trait::async_trait;
use models::product::Product;
use serde_json::Value;

use crate::errors::ServiceError;

/// Trait abstraction for product record storage.
///
/// Inputs are raw JSON bodies; implementations validate them, assign ids and
/// persist. The file-backed implementation can be swapped for a locking or
/// transactional one without touching callers.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Full collection in storage order.
    async fn list(&self) -> Result<Vec<Product>, ServiceError>;
    async fn get(&self, id: u64) -> Result<Product, ServiceError>;
    async fn create(&self, input: Value) -> Result<Product, ServiceError>;
    /// Only `name`, `quantity` and `price` present in `input` change.
    async fn update(&self, id: u64, input: Value) -> Result<Product, ServiceError>;
    async fn delete(&self, id: u64) -> Result<(), ServiceError>;
}
