// ============================
// crates/backend-lib/src/storage.rs
// ============================
//! Storage abstraction with in-memory and flat-file implementations.
//!
//! The directory keeps the authoritative in-memory index; a storage backend only has
//! to replay records at startup and durably append new ones.
use std::{fs, path::{Path, PathBuf}};
use tokio::{fs as tokio_fs, io::AsyncWriteExt};
use async_trait::async_trait;
use thiserror::Error;
use crate::directory::User;

/// Name of the append-only user log inside the data directory
pub const USERS_LOG: &str = "users.log";

/// Storage failures
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt record at line {line}: {source}")]
    Corrupt {
        line: usize,
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trait for storage backends
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read every persisted user, oldest first
    async fn load_users(&self) -> Result<Vec<User>, StorageError>;

    /// Persist a newly registered user
    async fn append_user(&self, user: &User) -> Result<(), StorageError>;
}

/// Keeps nothing; users live as long as the process
#[derive(Clone, Copy, Debug, Default)]
pub struct InMemoryStorage;

#[async_trait]
impl Storage for InMemoryStorage {
    async fn load_users(&self) -> Result<Vec<User>, StorageError> {
        Ok(Vec::new())
    }

    async fn append_user(&self, _user: &User) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Flat-file implementation of the Storage trait: one JSON object per line
#[derive(Clone, Debug)]
pub struct FlatFileStorage {
    root: PathBuf,
}

impl FlatFileStorage {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn log_path(&self) -> PathBuf {
        self.root.join(USERS_LOG)
    }
}

#[async_trait]
impl Storage for FlatFileStorage {
    async fn load_users(&self) -> Result<Vec<User>, StorageError> {
        let path = self.log_path();
        if !tokio_fs::try_exists(&path).await? {
            return Ok(Vec::new());
        }

        let content = tokio_fs::read_to_string(&path).await?;
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line).map_err(|source| StorageError::Corrupt {
                    line: idx + 1,
                    source,
                })
            })
            .collect()
    }

    /// Append a JSON line to `users.log`.
    async fn append_user(&self, user: &User) -> Result<(), StorageError> {
        let mut line = serde_json::to_string(user)?;
        line.push('\n');

        let mut file = tokio_fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log_path())
            .await?;
        let len = file.metadata().await?.len();

        let written = write_durably(&mut file, line.as_bytes()).await;
        rollback_on_error(&file, len, written).await
    }
}

async fn write_durably(file: &mut tokio_fs::File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes).await?;
    file.sync_data().await
}

/// Cut the log back to `len` when an append failed, so no partial or unacknowledged
/// record is left behind for the next load.
async fn rollback_on_error(
    file: &tokio_fs::File,
    len: u64,
    result: std::io::Result<()>,
) -> Result<(), StorageError> {
    if let Err(e) = result {
        if let Err(truncate) = file.set_len(len).await {
            tracing::error!(error = %truncate, "failed to roll back partial user record");
        }
        return Err(e.into());
    }
    Ok(())
}
