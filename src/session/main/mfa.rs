//! Enrollment and challenge steps of the MFA handshake

use reqwest::header::{COOKIE, SET_COOKIE};

use crate::session::config::{
    ACCESS_TOKEN_COOKIE, MFA_TOKEN_COOKIE, TWO_FACTOR_SETUP_PATH, TWO_FACTOR_VERIFY_LOGIN_PATH,
    TWO_FACTOR_VERIFY_SETUP_PATH,
};
use crate::session::errors::SessionError;
use crate::session::types::{AuthConfig, CodeRequest, TwoFactorSetupResponse};
use crate::totp::generate_code;
use crate::utils::extract_cookie_value;

/// Requests a fresh TOTP secret for the account authenticated by
/// `access_token`. The server returns the manual entry key exactly once.
pub(crate) async fn request_totp_secret(
    client: &reqwest::Client,
    config: &AuthConfig,
    access_token: &str,
) -> Result<String, SessionError> {
    let response = client
        .post(format!("{}{TWO_FACTOR_SETUP_PATH}", config.api_base_url))
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| SessionError::Http(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SessionError::MfaSetupFailed(status.to_string()));
    }

    let body: TwoFactorSetupResponse = response
        .json()
        .await
        .map_err(|e| SessionError::Serde(format!("Failed to deserialize 2FA setup response: {e}")))?;

    Ok(body.manual_entry_key)
}

/// Confirms the enrollment by submitting a code derived from the new secret.
///
/// A rejected code here is deterministic (wrong secret or clock), not
/// transient, so the failure is fatal.
pub(crate) async fn verify_totp_setup(
    client: &reqwest::Client,
    config: &AuthConfig,
    access_token: &str,
    secret: &str,
) -> Result<(), SessionError> {
    let code = generate_code(secret);
    let response = client
        .post(format!("{}{TWO_FACTOR_VERIFY_SETUP_PATH}", config.api_base_url))
        .bearer_auth(access_token)
        .json(&CodeRequest { code: &code })
        .send()
        .await
        .map_err(|e| SessionError::Http(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SessionError::MfaVerifySetupFailed(status.to_string()));
    }
    tracing::debug!("2FA setup verified");

    Ok(())
}

/// Completes the MFA challenge during login.
///
/// The short-lived `mfa_token` goes back as a cookie; the challenge endpoint
/// keys off the cookie, not a bearer header. The response's `access_token`
/// cookie carries the session credential.
pub(crate) async fn verify_totp_login(
    client: &reqwest::Client,
    config: &AuthConfig,
    mfa_token: &str,
    secret: &str,
) -> Result<String, SessionError> {
    let code = generate_code(secret);
    let response = client
        .post(format!("{}{TWO_FACTOR_VERIFY_LOGIN_PATH}", config.api_base_url))
        .header(COOKIE, format!("{MFA_TOKEN_COOKIE}={mfa_token}"))
        .json(&CodeRequest { code: &code })
        .send()
        .await
        .map_err(|e| SessionError::Http(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SessionError::MfaVerifyLoginFailed(status.to_string()));
    }

    let cookies: Vec<&str> = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();

    extract_cookie_value(cookies, ACCESS_TOKEN_COOKIE)
        .map(str::to_string)
        .ok_or_else(|| {
            SessionError::MfaVerifyLoginFailed(format!(
                "no {ACCESS_TOKEN_COOKIE} cookie in response"
            ))
        })
}
