use async_trait::async_trait;

use super::errors::StoreError;

/// Backing store for the admin TOTP secret.
///
/// Exactly one secret is authoritative per admin identity at a time; saving a
/// new one (re-enrollment) invalidates codes derived from the old one.
#[async_trait]
pub trait SecretStore: Send + Sync + 'static {
    /// Load the current secret, if one has been saved.
    async fn load(&self) -> Result<Option<String>, StoreError>;

    /// Save the secret, replacing any previous one.
    async fn save(&self, secret: &str) -> Result<(), StoreError>;
}
