use async_trait::async_trait;
use tokio::sync::Mutex;

use super::errors::StoreError;
use super::types::SecretStore;

/// In-memory secret store for exercising the protocol logic without touching
/// the filesystem.
#[derive(Default)]
pub struct InMemorySecretStore {
    secret: Mutex<Option<String>>,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a secret, as if enrollment already happened.
    pub fn with_secret(secret: &str) -> Self {
        Self {
            secret: Mutex::new(Some(secret.to_string())),
        }
    }
}

#[async_trait]
impl SecretStore for InMemorySecretStore {
    async fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.secret.lock().await.clone())
    }

    async fn save(&self, secret: &str) -> Result<(), StoreError> {
        *self.secret.lock().await = Some(secret.to_string());
        Ok(())
    }
}
