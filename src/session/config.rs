//! Endpoint paths and cookie names contracted with the authentication API

pub(crate) const LOGIN_PATH: &str = "/api/v1/auth/login";
pub(crate) const TWO_FACTOR_SETUP_PATH: &str = "/api/v1/auth/2fa/setup";
pub(crate) const TWO_FACTOR_VERIFY_SETUP_PATH: &str = "/api/v1/auth/2fa/verify-setup";
pub(crate) const TWO_FACTOR_VERIFY_LOGIN_PATH: &str = "/api/v1/auth/2fa/verify-login";

/// Cookie carrying the bearer credential of a fully authenticated session
pub(crate) const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Cookie carrying the short-lived "password verified, second factor pending"
/// token; sent back to the challenge endpoint as a cookie, never as a bearer
pub(crate) const MFA_TOKEN_COOKIE: &str = "mfa_token";
