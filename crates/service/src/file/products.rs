use std::{path::PathBuf, sync::Arc};

use models::product::{next_id, NewProduct, Product, ProductPatch};
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::ServiceError;
use crate::storage::json_file_store::JsonFileStore;
use crate::store::product_store::ProductStore;

/// File storage: the product collection persisted as one JSON array.
///
/// Each call loads the whole file, works on a local copy and, for mutations,
/// writes the whole collection back. Two concurrent mutations can interleave
/// between load and save; the last writer wins.
#[derive(Debug, Clone)]
pub struct FileProductStore {
    file: JsonFileStore<Product>,
}

impl FileProductStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { file: JsonFileStore::new(path) })
    }

    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        self.file.load().await
    }

    pub async fn get(&self, id: u64) -> Result<Product, ServiceError> {
        self.file
            .load()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ServiceError::not_found("product"))
    }

    pub async fn create(&self, input: Value) -> Result<Product, ServiceError> {
        let mut products = self.file.load().await?;
        let input = NewProduct::from_json(&input)?;
        let id = next_id(&products)
            .ok_or_else(|| ServiceError::write(self.file.path(), "product id space exhausted"))?;
        let product = input.into_product(id);
        products.push(product.clone());
        self.persist(&products, "create", product.id).await?;
        info!(id = product.id, name = %product.name, "product created");
        Ok(product)
    }

    pub async fn update(&self, id: u64, input: Value) -> Result<Product, ServiceError> {
        let mut products = self.file.load().await?;
        let existing = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ServiceError::not_found("product"))?;
        let patch = ProductPatch::from_json(&input)?;
        patch.apply(existing);
        let updated = existing.clone();
        self.persist(&products, "update", id).await?;
        info!(id, "product updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: u64) -> Result<(), ServiceError> {
        let mut products = self.file.load().await?;
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(ServiceError::not_found("product"));
        }
        self.persist(&products, "delete", id).await?;
        info!(id, "product deleted");
        Ok(())
    }

    async fn persist(&self, products: &[Product], op: &str, id: u64) -> Result<(), ServiceError> {
        self.file.save(products).await.inspect_err(|e| {
            warn!(op, id, error = %e, "mutation not committed");
        })
    }
}

#[async_trait::async_trait]
impl ProductStore for FileProductStore {
    async fn list(&self) -> Result<Vec<Product>, ServiceError> { self.list().await }
    async fn get(&self, id: u64) -> Result<Product, ServiceError> { self.get(id).await }
    async fn create(&self, input: Value) -> Result<Product, ServiceError> { self.create(input).await }
    async fn update(&self, id: u64, input: Value) -> Result<Product, ServiceError> { self.update(id, input).await }
    async fn delete(&self, id: u64) -> Result<(), ServiceError> { self.delete(id).await }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cleanup, temp_data_file, unwritable_data_file};
    use models::errors::{Field, ValidationError, ValidationKind};
    use serde_json::json;

    fn widget() -> Value {
        json!({"name": " Widget ", "quantity": 5, "price": 9.99})
    }

    #[tokio::test]
    async fn create_on_empty_store() -> Result<(), anyhow::Error> {
        let tmp = temp_data_file("products_create");
        let store = FileProductStore::new(&tmp);

        let created = store.create(widget()).await?;
        assert_eq!(created, Product { id: 1, name: "Widget".into(), quantity: 5, price: 9.99 });
        assert_eq!(store.list().await?, vec![created]);

        // a client-supplied id is ignored
        let second = store
            .create(json!({"id": 500, "name": "Gadget", "quantity": 1, "price": 2}))
            .await?;
        assert_eq!(second.id, 2);
        assert!(store.list().await?.iter().all(|p| p.id != 500));

        cleanup(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn ids_follow_max_existing() -> Result<(), anyhow::Error> {
        let tmp = temp_data_file("products_ids");
        let store = FileProductStore::new(&tmp);

        let a = store.create(widget()).await?;
        let b = store.create(json!({"name": "Gadget", "quantity": 1, "price": 2})).await?;
        assert_eq!((a.id, b.id), (1, 2));

        // deleting the highest id lets it be reused; deleting a lower one does not shift anything
        store.delete(2).await?;
        let c = store.create(json!({"name": "C", "quantity": 1, "price": 1})).await?;
        assert_eq!(c.id, 2);
        store.delete(1).await?;
        let d = store.create(json!({"name": "D", "quantity": 1, "price": 1})).await?;
        assert_eq!(d.id, 3);

        let ids: Vec<u64> = store.list().await?.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);

        cleanup(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn ids_continue_from_stored_max() -> Result<(), anyhow::Error> {
        let tmp = temp_data_file("products_seeded");
        tokio::fs::write(&tmp, br#"[{"id": 41, "name": "Old", "quantity": 3, "price": 1.5}]"#).await?;
        let store = FileProductStore::new(&tmp);
        let created = store.create(widget()).await?;
        assert_eq!(created.id, 42);
        cleanup(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn exhausted_id_space_is_refused() -> Result<(), anyhow::Error> {
        let tmp = temp_data_file("products_max_id");
        let seeded = br#"[{"id": 18446744073709551615, "name": "Last", "quantity": 1, "price": 1.0}]"#;
        tokio::fs::write(&tmp, seeded).await?;
        let store = FileProductStore::new(&tmp);

        let err = store.create(widget()).await.unwrap_err();
        assert!(matches!(err, ServiceError::StorageWrite { .. }));
        // no wrapped id 0 record was written
        assert_eq!(tokio::fs::read(&tmp).await?, seeded);

        cleanup(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() -> Result<(), anyhow::Error> {
        let tmp = temp_data_file("products_update");
        let store = FileProductStore::new(&tmp);
        store.create(widget()).await?;

        let updated = store.update(1, json!({"quantity": 10})).await?;
        assert_eq!(updated, Product { id: 1, name: "Widget".into(), quantity: 10, price: 9.99 });

        let updated = store.update(1, json!({"price": "12.5"})).await?;
        assert_eq!((updated.quantity, updated.price), (10, 12.5));

        let updated = store.update(1, json!({"name": " Sprocket"})).await?;
        assert_eq!(updated.name, "Sprocket");
        assert_eq!(store.get(1).await?, updated);

        cleanup(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn invalid_update_changes_nothing() -> Result<(), anyhow::Error> {
        let tmp = temp_data_file("products_update_invalid");
        let store = FileProductStore::new(&tmp);
        store.create(widget()).await?;
        let before = tokio::fs::read(&tmp).await?;

        // valid quantity but invalid price: neither is applied
        let err = store.update(1, json!({"quantity": 3, "price": -1})).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError { field: Field::Price, kind: ValidationKind::Negative })
        ));
        assert_eq!(tokio::fs::read(&tmp).await?, before);

        cleanup(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn not_found_is_consistent_and_harmless() -> Result<(), anyhow::Error> {
        let tmp = temp_data_file("products_not_found");
        let store = FileProductStore::new(&tmp);
        store.create(widget()).await?;
        let before = tokio::fs::read(&tmp).await?;

        assert!(matches!(store.get(9).await, Err(ServiceError::NotFound(_))));
        // lookup precedes validation
        assert!(matches!(store.update(9, json!({"name": ""})).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(store.delete(9).await, Err(ServiceError::NotFound(_))));
        assert_eq!(tokio::fs::read(&tmp).await?, before);

        store.delete(1).await?;
        assert!(matches!(store.get(1).await, Err(ServiceError::NotFound(_))));
        assert!(store.list().await?.is_empty());

        cleanup(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn invalid_create_is_not_stored() -> Result<(), anyhow::Error> {
        let tmp = temp_data_file("products_invalid_create");
        let store = FileProductStore::new(&tmp);
        let err = store.create(json!({"name": "", "quantity": 1, "price": 1})).await.unwrap_err();
        assert_eq!(err.kind(), "validation_error");
        assert_eq!(err.to_string(), "parameter \"name\" is invalid or empty");
        assert!(tokio::fs::metadata(&tmp).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn write_failure_is_not_committed() -> Result<(), anyhow::Error> {
        let store = FileProductStore::new(unwritable_data_file());
        let err = store.create(widget()).await.unwrap_err();
        assert!(matches!(err, ServiceError::StorageWrite { .. }));
        assert!(store.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_store_fails_every_operation() -> Result<(), anyhow::Error> {
        let tmp = temp_data_file("products_corrupt");
        tokio::fs::write(&tmp, b"not json").await?;
        let store = FileProductStore::new(&tmp);

        assert!(matches!(store.list().await, Err(ServiceError::StorageRead { .. })));
        assert!(matches!(store.get(1).await, Err(ServiceError::StorageRead { .. })));
        assert!(matches!(store.create(widget()).await, Err(ServiceError::StorageRead { .. })));
        // the corrupt file is left for inspection
        assert_eq!(tokio::fs::read(&tmp).await?, b"not json");

        cleanup(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn usable_through_trait_object() -> Result<(), anyhow::Error> {
        let tmp = temp_data_file("products_dyn");
        let store: Arc<dyn ProductStore> = FileProductStore::new(&tmp);
        let p = store.create(widget()).await?;
        assert_eq!(store.get(p.id).await?, p);
        store.delete(p.id).await?;
        assert!(store.list().await?.is_empty());
        cleanup(&tmp).await;
        Ok(())
    }
}
