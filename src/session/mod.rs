//! Admin session acquisition with TOTP multi-factor authentication
//!
//! Drives the backend's authentication API through the full handshake:
//! password login, first-use TOTP enrollment when the backend has no factor
//! yet, and the MFA challenge, caching the resulting bearer token for the
//! process lifetime.

mod config;
mod errors;
mod main;
mod types;

pub use errors::SessionError;
pub use main::SessionManager;
pub use types::{AuthConfig, Credentials, LoginOutcome};
