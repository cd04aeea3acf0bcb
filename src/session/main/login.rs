use reqwest::header::{HeaderMap, SET_COOKIE};

use crate::session::config::{ACCESS_TOKEN_COOKIE, LOGIN_PATH, MFA_TOKEN_COOKIE};
use crate::session::errors::SessionError;
use crate::session::types::{AuthConfig, LoginOutcome, LoginRequest};
use crate::utils::extract_cookie_value;

/// Submits the password login and classifies the response.
///
/// A non-success status is fatal: invalid credentials are a configuration
/// error, not a transient condition, so there is no retry.
pub(crate) async fn login(
    client: &reqwest::Client,
    config: &AuthConfig,
) -> Result<LoginOutcome, SessionError> {
    let response = client
        .post(format!("{}{LOGIN_PATH}", config.api_base_url))
        .json(&LoginRequest {
            email: &config.credentials.email,
            password: &config.credentials.password,
        })
        .send()
        .await
        .map_err(|e| SessionError::Http(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SessionError::LoginFailed(status.to_string()));
    }
    tracing::debug!("Login response status: {status}");

    classify_login_response(response.headers())
}

/// The backend signals its decision through cookies: `access_token` when the
/// password alone completes authentication, `mfa_token` when a second factor
/// must still be verified. Neither being present is a contract violation.
pub(crate) fn classify_login_response(headers: &HeaderMap) -> Result<LoginOutcome, SessionError> {
    let cookies: Vec<&str> = headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();

    if let Some(token) = extract_cookie_value(cookies.iter().copied(), ACCESS_TOKEN_COOKIE) {
        return Ok(LoginOutcome::AccessTokenIssued(token.to_string()));
    }
    if let Some(token) = extract_cookie_value(cookies.iter().copied(), MFA_TOKEN_COOKIE) {
        return Ok(LoginOutcome::MfaRequired(token.to_string()));
    }

    Err(SessionError::UnexpectedLoginResponse(format!(
        "neither {ACCESS_TOKEN_COOKIE} nor {MFA_TOKEN_COOKIE} cookie present"
    )))
}
