use serde::{Deserialize, Serialize};

use super::errors::SessionError;

/// Login credentials for the admin identity. Read once at startup, immutable
/// afterwards.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Configuration for a [`SessionManager`](super::SessionManager).
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Base URL of the backend API, e.g. `http://127.0.0.1:8000`
    pub api_base_url: String,
    /// Admin tier credentials
    pub credentials: Credentials,
}

impl AuthConfig {
    /// Reads the configuration from `API_BASE_URL`, `ADMIN_EMAIL` and
    /// `ADMIN_PASSWORD`.
    ///
    /// A missing variable is a configuration error surfaced to the caller,
    /// not a panic, so the failing test reports a diagnosable message.
    pub fn from_env() -> Result<Self, SessionError> {
        let api_base_url = required_env("API_BASE_URL")?;
        let email = required_env("ADMIN_EMAIL")?;
        let password = required_env("ADMIN_PASSWORD")?;
        Ok(Self {
            api_base_url,
            credentials: Credentials { email, password },
        })
    }
}

fn required_env(name: &str) -> Result<String, SessionError> {
    std::env::var(name).map_err(|_| SessionError::Config(format!("{name} is not set")))
}

/// Outcome of a password login, classified from the response's `Set-Cookie`
/// headers. The backend issues exactly one of the two cookies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Password alone completed authentication; MFA is not enrolled for this
    /// identity
    AccessTokenIssued(String),
    /// Password verified, second factor pending; the token is short-lived and
    /// single-use
    MfaRequired(String),
}

/// Request body for the login endpoint
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Request body for both 2FA verification endpoints
#[derive(Debug, Serialize)]
pub(crate) struct CodeRequest<'a> {
    pub code: &'a str,
}

/// Response body of the 2FA setup endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TwoFactorSetupResponse {
    pub manual_entry_key: String,
}
