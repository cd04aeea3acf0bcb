//! mfa-session - Admin session bootstrap for end-to-end test harnesses
//!
//! This crate acquires authenticated admin sessions from a web application's
//! authentication API, enrolling and verifying a TOTP second factor on demand
//! so that privileged test scenarios work against both fresh environments
//! (no factor enrolled yet) and environments where a prior phase already
//! enrolled one.

mod config;
mod session;
mod store;
mod totp;
mod utils;

// Re-export the session acquisition surface
pub use session::{AuthConfig, Credentials, LoginOutcome, SessionError, SessionManager};

// Re-export the secret store abstraction and its implementations
pub use store::{FileSecretStore, InMemorySecretStore, SecretStore, StoreError};

// Re-export TOTP code generation
pub use totp::{base32_decode, generate_code, generate_code_at, seconds_until_step};

// Re-export the default secret file path
pub use config::TOTP_SECRET_FILE;

pub use utils::extract_cookie_value;
