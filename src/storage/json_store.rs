use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Result;
use fs4::tokio::AsyncFileExt;
use serde::{de::DeserializeOwned, Serialize};
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncWriteExt},
};
use tracing::{debug, warn};

use super::{KeyValueStore, StorageKey};

/// Keeps every key in its own `<key>.json` file. Files are locked while being read or written so
/// that a running pomodoro and a `stats` call don't step on each other.
pub struct JsonFileStore {
    storage_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(storage_dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&storage_dir)?;

        Ok(Self { storage_dir })
    }

    fn path_for(&self, key: StorageKey) -> PathBuf {
        self.storage_dir.join(format!("{}.json", key.as_str()))
    }

    async fn read_locked(path: &Path) -> Result<Option<String>, std::io::Error> {
        let mut file = match File::open(path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        file.lock_shared()?;
        let mut content = String::new();
        let read = file.read_to_string(&mut content).await;
        file.unlock_async().await?;
        read?;
        Ok(Some(content))
    }

    async fn write_locked(path: &Path, content: &[u8]) -> Result<(), std::io::Error> {
        let mut file = File::options()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .await?;
        file.lock_exclusive()?;
        let result = async {
            file.set_len(0).await?;
            file.write_all(content).await?;
            file.flush().await
        }
        .await;
        file.unlock_async().await?;
        result
    }
}

impl KeyValueStore for JsonFileStore {
    async fn get<T: DeserializeOwned + Send>(&self, key: StorageKey) -> Result<Option<T>> {
        let path = self.path_for(key);
        debug!("Reading {key} from {path:?}");
        let Some(content) = Self::read_locked(&path).await? else {
            return Ok(None);
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str::<T>(&content) {
            Ok(v) => Ok(Some(v)),
            Err(e) => {
                // A damaged document is treated like a missing one, same as the dashboard did.
                warn!("Stored value for {key} in {path:?} is not valid: {e}");
                Ok(None)
            }
        }
    }

    async fn set<T: Serialize + Sync>(&self, key: StorageKey, value: &T) -> Result<()> {
        let buffer = serde_json::to_vec_pretty(value)?;
        let path = self.path_for(key);
        debug!("Writing {} bytes of {key} to {path:?}", buffer.len());
        Self::write_locked(&path, &buffer).await?;
        Ok(())
    }
}
