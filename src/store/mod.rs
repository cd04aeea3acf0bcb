//! Persistence for the admin TOTP secret
//!
//! The backend hands out the secret exactly once at enrollment; it cannot be
//! retrieved again. Enrollment may happen in a different process phase than
//! the API-driven tests that later need the secret (a browser-based setup
//! stage, for example), so the secret is mirrored through a [`SecretStore`]
//! that both phases can reach.

mod errors;
mod file;
mod memory;
mod types;

pub use errors::StoreError;
pub use file::FileSecretStore;
pub use memory::InMemorySecretStore;
pub use types::SecretStore;
