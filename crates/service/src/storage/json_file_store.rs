use std::{io::ErrorKind, marker::PhantomData, path::{Path, PathBuf}};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::ser::PrettyFormatter;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, warn};

use crate::errors::ServiceError;

/// Generic JSON file-backed collection store.
///
/// Holds no records in memory: every `load` reads the whole file and every
/// `save` replaces it. Intended for small collections where a database is
/// overkill. There is no locking across a load/save pair.
#[derive(Debug, Clone)]
pub struct JsonFileStore<T> {
    file_path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), _record: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read the full collection. A missing file is an empty collection.
    pub async fn load(&self) -> Result<Vec<T>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ServiceError::read(&self.file_path, e)),
        };
        serde_json::from_slice(&bytes).map_err(|e| ServiceError::read(&self.file_path, e))
    }

    /// Replace the file with `records`. Readers see either the old or the new
    /// content, never a partial write.
    pub async fn save(&self, records: &[T]) -> Result<(), ServiceError> {
        let data = to_pretty_json(records).map_err(|e| ServiceError::write(&self.file_path, e))?;
        let tmp = self.temp_path();
        if let Err(e) = write_and_sync(&tmp, &data).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::write(&self.file_path, e));
        }
        if let Err(e) = fs::rename(&tmp, &self.file_path).await {
            warn!(path = %self.file_path.display(), error = %e, "rename over data file failed");
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::write(&self.file_path, e));
        }
        debug!(path = %self.file_path.display(), records = records.len(), "collection saved");
        Ok(())
    }

    // same directory as the target so the rename never crosses filesystems
    fn temp_path(&self) -> PathBuf {
        let name = self
            .file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "store".to_string());
        self.file_path
            .with_file_name(format!(".{}.{}.tmp", name, uuid::Uuid::new_v4()))
    }
}

fn to_pretty_json<T: Serialize>(records: &[T]) -> serde_json::Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut ser)?;
    out.push(b'\n');
    Ok(out)
}

async fn write_and_sync(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(data).await?;
    file.sync_all().await?;
    Ok(())
}
