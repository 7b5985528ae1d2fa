use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::{Mutex, MutexGuard};

pub const COLLECTION_PAIRS: &str = "pairs";
pub const COLLECTION_POSTS: &str = "posts";
pub const DOCUMENT_VISITS: &str = "visits";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed json in {}: {source}", path.display())]
    Serde {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Flat-file record store.
///
/// Every collection lives in `<root>/<name>.json` and is always read and
/// written as a whole. Writers go through [`JsonStore::update_collection`] or
/// [`JsonStore::update_document`], which hold a single store-wide lock across
/// the read-modify-write so concurrent requests cannot lose each other's
/// updates. Plain reads do not take the lock; saves replace the file through
/// a rename, so a reader sees either the old or the new contents.
#[derive(Debug)]
pub struct JsonStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }

    /// Acquires the store-wide writer lock.
    ///
    /// Only needed by callers that must look at a collection before deciding
    /// whether to write it at all; everything else should use the `update_*`
    /// helpers.
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Loads a collection, returning `None` when its file does not exist.
    pub async fn load_existing<T>(&self, name: &str) -> Result<Option<Vec<T>>, StoreError>
    where
        T: DeserializeOwned,
    {
        self.read_json(name).await
    }

    /// Loads a collection, treating a missing file as an empty collection.
    pub async fn load_collection<T>(&self, name: &str) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        Ok(self.load_existing(name).await?.unwrap_or_default())
    }

    pub async fn save_collection<T>(&self, name: &str, records: &[T]) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        self.write_json(name, records).await
    }

    pub async fn load_document<T>(&self, name: &str) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        Ok(self.read_json(name).await?.unwrap_or_default())
    }

    pub async fn save_document<T>(&self, name: &str, document: &T) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        self.write_json(name, document).await
    }

    /// Runs `apply` against the full collection under the writer lock.
    ///
    /// The collection is written back only when `apply` returns `Ok`; an
    /// error from `apply` leaves the file untouched.
    pub async fn update_collection<T, R, E, F>(&self, name: &str, apply: F) -> Result<R, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<StoreError>,
        F: FnOnce(&mut Vec<T>) -> Result<R, E>,
    {
        let _guard = self.write_lock.lock().await;
        let mut records: Vec<T> = self.load_collection(name).await?;
        let outcome = apply(&mut records)?;
        self.save_collection(name, &records).await?;
        Ok(outcome)
    }

    pub async fn update_document<T, R, F>(&self, name: &str, apply: F) -> Result<R, StoreError>
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce(&mut T) -> R,
    {
        let _guard = self.write_lock.lock().await;
        let mut document: T = self.load_document(name).await?;
        let outcome = apply(&mut document);
        self.save_document(name, &document).await?;
        Ok(outcome)
    }

    /// Writes `initial` for `name` unless a file for it already exists.
    pub async fn seed<T>(&self, name: &str, initial: &T) -> Result<bool, StoreError>
    where
        T: Serialize,
    {
        let _guard = self.write_lock.lock().await;
        let path = self.path_for(name);
        let exists = async_fs::metadata(&path).await.is_ok();
        if exists {
            return Ok(false);
        }
        self.write_json(name, initial).await?;
        Ok(true)
    }

    async fn read_json<T>(&self, name: &str) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let path = self.path_for(name);
        let json = match async_fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| StoreError::Serde { path, source })
    }

    async fn write_json<T>(&self, name: &str, value: &T) -> Result<(), StoreError>
    where
        T: Serialize + ?Sized,
    {
        async_fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StoreError::Io {
                path: self.root.clone(),
                source,
            })?;

        let path = self.path_for(name);
        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Serde {
            path: path.clone(),
            source,
        })?;

        let staging = self.root.join(format!(".{name}.json.tmp"));
        async_fs::write(&staging, json)
            .await
            .map_err(|source| StoreError::Io {
                path: staging.clone(),
                source,
            })?;
        async_fs::rename(&staging, &path)
            .await
            .map_err(|source| StoreError::Io { path, source })
    }
}
