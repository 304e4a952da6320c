#![cfg(test)]
use std::path::PathBuf;

/// Unique file path under the system temp dir; the file itself is not created.
pub fn temp_data_file(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{}_{}.json", prefix, uuid::Uuid::new_v4()))
}

/// Path whose parent directory does not exist, so any write to it fails.
pub fn unwritable_data_file() -> PathBuf {
    std::env::temp_dir()
        .join(format!("missing_dir_{}", uuid::Uuid::new_v4()))
        .join("products.json")
}

pub async fn cleanup(path: &PathBuf) {
    let _ = tokio::fs::remove_file(path).await;
}
