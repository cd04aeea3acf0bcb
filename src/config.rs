//! Central configuration for the mfa-session crate

use std::sync::LazyLock;

/// Path of the file mirroring the admin TOTP secret between process phases
///
/// Browser-driven enrollment and API-driven verification may run in separate
/// processes; this file is their only shared state.
/// Default: ".auth/admin-totp-secret"
pub static TOTP_SECRET_FILE: LazyLock<String> = LazyLock::new(|| {
    std::env::var("TOTP_SECRET_FILE").unwrap_or_else(|_| ".auth/admin-totp-secret".to_string())
});
