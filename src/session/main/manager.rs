use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::session::errors::SessionError;
use crate::session::types::{AuthConfig, LoginOutcome};
use crate::store::SecretStore;

use super::login::login;
use super::mfa::{request_totp_secret, verify_totp_login, verify_totp_setup};

/// Process-wide admin session cache and handshake driver.
///
/// Constructed once per test-process bootstrap and shared by reference;
/// substituting a fresh instance, or a different [`SecretStore`], is how
/// tests isolate themselves. The cache never invalidates: a stale token the
/// server has since rejected surfaces as a 401 from whatever call uses it.
pub struct SessionManager {
    config: AuthConfig,
    client: reqwest::Client,
    store: Arc<dyn SecretStore>,
    state: Mutex<CachedCredentials>,
}

#[derive(Default)]
struct CachedCredentials {
    admin_token: Option<String>,
    totp_secret: Option<String>,
}

impl SessionManager {
    pub fn new(config: AuthConfig, store: Arc<dyn SecretStore>) -> Self {
        Self {
            config,
            client: build_client(),
            store,
            state: Mutex::new(CachedCredentials::default()),
        }
    }

    /// Returns a bearer token for the admin identity, performing the full
    /// login handshake on first use and a cache hit afterwards.
    ///
    /// Safe to call from any test in any order: the handshake enrolls the
    /// TOTP factor when the backend has none yet and completes the challenge
    /// when a prior phase already enrolled it, without the caller knowing
    /// which.
    #[tracing::instrument(skip(self))]
    pub async fn get_admin_token(&self) -> Result<String, SessionError> {
        // Holding the lock across the handshake also serializes concurrent
        // in-process callers onto a single network exchange.
        let mut state = self.state.lock().await;
        if let Some(token) = &state.admin_token {
            tracing::debug!("Admin token cache hit");
            return Ok(token.clone());
        }

        let mfa_token = match login(&self.client, &self.config).await? {
            LoginOutcome::MfaRequired(token) => token,
            LoginOutcome::AccessTokenIssued(access_token) => {
                self.enroll(&mut state, &access_token).await?
            }
        };

        let secret = self.find_secret(&mut state).await?;
        let admin_token = verify_totp_login(&self.client, &self.config, &mfa_token, &secret).await?;

        state.admin_token = Some(admin_token.clone());
        tracing::info!("Admin access token acquired and cached");
        Ok(admin_token)
    }

    /// Password login without the MFA continuation, for suites that drive the
    /// challenge through the browser.
    pub async fn login(&self) -> Result<LoginOutcome, SessionError> {
        login(&self.client, &self.config).await
    }

    /// Enrolls the TOTP factor and re-logs in, returning the fresh MFA token
    /// for the challenge step.
    async fn enroll(
        &self,
        state: &mut CachedCredentials,
        access_token: &str,
    ) -> Result<String, SessionError> {
        tracing::info!("MFA not enrolled for admin identity, performing enrollment");
        let secret = request_totp_secret(&self.client, &self.config, access_token).await?;

        // Persist before verification: the secret cannot be retrieved again,
        // and a failure in a later step must not lose it.
        state.totp_secret = Some(secret.clone());
        self.store.save(&secret).await?;

        verify_totp_setup(&self.client, &self.config, access_token, &secret).await?;

        match login(&self.client, &self.config).await? {
            LoginOutcome::MfaRequired(token) => Ok(token),
            LoginOutcome::AccessTokenIssued(_) => Err(SessionError::UnexpectedLoginResponse(
                "access_token issued without challenge after MFA enrollment".to_string(),
            )),
        }
    }

    /// Memory first, then the secret store; the server cannot hand the secret
    /// out again, so with neither the challenge is unanswerable.
    async fn find_secret(&self, state: &mut CachedCredentials) -> Result<String, SessionError> {
        if let Some(secret) = &state.totp_secret {
            return Ok(secret.clone());
        }
        if let Some(secret) = self.store.load().await? {
            tracing::debug!("TOTP secret loaded from secret store");
            state.totp_secret = Some(secret.clone());
            return Ok(secret);
        }
        Err(SessionError::SecretUnavailable)
    }
}

fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to create reqwest client")
}
