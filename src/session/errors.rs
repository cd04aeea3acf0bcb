use thiserror::Error;

use crate::store::StoreError;

/// Errors from admin session acquisition.
///
/// Nothing here is transient: every variant indicates a misconfiguration or a
/// protocol contract violation by the backend, so no handshake step is
/// retried. All errors propagate to the calling test.
#[derive(Debug, Error, Clone)]
pub enum SessionError {
    /// Missing or unusable configuration (credentials, base URL)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The login endpoint returned a non-success status
    #[error("Admin login failed: {0}")]
    LoginFailed(String),

    /// The login response matched neither expected shape
    #[error("Unexpected login response: {0}")]
    UnexpectedLoginResponse(String),

    #[error("2FA setup failed: {0}")]
    MfaSetupFailed(String),

    #[error("2FA setup verification failed: {0}")]
    MfaVerifySetupFailed(String),

    #[error("2FA login verification failed: {0}")]
    MfaVerifyLoginFailed(String),

    /// The challenge branch was reached with no TOTP secret in memory or in
    /// the secret store. Only whoever performed enrollment holds the secret.
    #[error("No TOTP secret available for the admin identity")]
    SecretUnavailable,

    #[error("Http error: {0}")]
    Http(String),

    #[error("Serde error: {0}")]
    Serde(String),

    /// Error from the secret store
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}
