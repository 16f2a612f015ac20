//! Object storage for uploaded photos.
//!
//! Handlers talk to an [`ObjectStore`]; the server wires in a
//! [`LocalObjectStore`] that writes into `UPLOAD_DIR`, which the router also
//! serves statically. Keys are content hashes, so uploading the same bytes
//! twice yields the same key.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};

/// Errors raised by an object store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Location of a stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Store-relative key, persisted as `project_photos.storage_path`.
    pub key: String,
    /// Public URL the object is served from.
    pub url: String,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under a key derived from their content.
    async fn put(&self, bytes: &[u8], extension: &str) -> Result<StoredObject, StorageError>;

    /// Remove an object. Returns `false` if it did not exist.
    async fn delete(&self, key: &str) -> Result<bool, StorageError>;

    /// Public URL for a key.
    fn public_url(&self, key: &str) -> String;
}

/// Content-addressed key: hex SHA-256 of the bytes plus the extension.
pub fn content_key(bytes: &[u8], extension: &str) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:x}.{extension}")
}

/// Read pixel dimensions from the image header without decoding the image.
pub fn image_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

fn check_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Local disk
// ---------------------------------------------------------------------------

/// Stores objects as flat files in one directory.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base: &str) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(&self, bytes: &[u8], extension: &str) -> Result<StoredObject, StorageError> {
        let key = content_key(bytes, extension);
        check_key(&key)?;

        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.root.join(&key);
        if tokio::fs::try_exists(&path).await? {
            tracing::debug!(%key, "Object already stored");
        } else {
            tokio::fs::write(&path, bytes).await?;
            tracing::debug!(%key, size = bytes.len(), "Stored object");
        }

        Ok(StoredObject {
            url: self.public_url(&key),
            key,
        })
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        check_key(key)?;
        match tokio::fs::remove_file(self.root.join(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base)
    }
}
