use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::TOTP_SECRET_FILE;

use super::errors::StoreError;
use super::types::SecretStore;

/// File-backed secret store: a single plaintext file holding the current
/// admin TOTP secret.
///
/// The file is read optimistically without locking. Two processes enrolling
/// at the same time race; the last save wins.
pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the well-known path configured through `TOTP_SECRET_FILE`.
    pub fn from_env() -> Self {
        Self::new(TOTP_SECRET_FILE.as_str())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SecretStore for FileSecretStore {
    async fn load(&self) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let secret = contents.trim();
                if secret.is_empty() {
                    Ok(None)
                } else {
                    tracing::debug!("Loaded TOTP secret from {}", self.path.display());
                    Ok(Some(secret.to_string()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Storage(e.to_string())),
        }
    }

    async fn save(&self, secret: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, secret).await?;
        tracing::debug!("Saved TOTP secret to {}", self.path.display());
        Ok(())
    }
}
