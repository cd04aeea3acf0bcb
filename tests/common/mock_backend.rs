//! Axum-based mock of the backend authentication API
//!
//! Each test starts its own instance on an ephemeral port with the scenario
//! it needs (fresh environment, factor already enrolled, misbehaving server),
//! so call counters and enrollment state stay isolated per test.

use axum::{
    Router,
    extract::{Json, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use mfa_session::{AuthConfig, Credentials, generate_code_at};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery-staple";
/// The manual entry key the mock hands out at 2FA setup
pub const TOTP_SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";
pub const MFA_TOKEN: &str = "mfa-token-from-mock";
pub const SETUP_ACCESS_TOKEN: &str = "setup-access-token";
pub const FINAL_ACCESS_TOKEN: &str = "final-access-token";

/// Per-endpoint request counters, for memoization and branch assertions
#[derive(Debug, Default, Clone)]
pub struct CallCounts {
    pub login: usize,
    pub setup: usize,
    pub verify_setup: usize,
    pub verify_login: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scenario {
    /// No MFA factor enrolled yet; login issues an access_token cookie
    Fresh,
    /// Factor already enrolled; login issues an mfa_token cookie
    Enrolled,
    /// Contract violation: login succeeds but sets neither cookie
    Malformed,
    /// Fresh, but the verify-setup endpoint fails server-side
    FailVerifySetup,
}

struct BackendState {
    scenario: Scenario,
    enrolled: bool,
    counts: CallCounts,
}

type SharedState = Arc<Mutex<BackendState>>;

pub struct MockBackend {
    pub base_url: String,
    state: SharedState,
    _server: JoinHandle<()>,
}

impl MockBackend {
    /// Backend with no MFA factor enrolled yet (fresh environment).
    pub async fn fresh() -> Self {
        Self::start(Scenario::Fresh).await
    }

    /// Backend where the admin's TOTP factor is already enrolled with
    /// [`TOTP_SECRET`].
    pub async fn enrolled() -> Self {
        Self::start(Scenario::Enrolled).await
    }

    /// Backend whose login response carries neither expected cookie.
    pub async fn malformed() -> Self {
        Self::start(Scenario::Malformed).await
    }

    /// Fresh backend whose verify-setup endpoint returns a server error.
    pub async fn failing_verify_setup() -> Self {
        Self::start(Scenario::FailVerifySetup).await
    }

    async fn start(scenario: Scenario) -> Self {
        super::init_test_tracing();

        let state: SharedState = Arc::new(Mutex::new(BackendState {
            scenario,
            enrolled: scenario == Scenario::Enrolled,
            counts: CallCounts::default(),
        }));

        let app = Router::new()
            .route("/api/v1/auth/login", post(login))
            .route("/api/v1/auth/2fa/setup", post(two_factor_setup))
            .route("/api/v1/auth/2fa/verify-setup", post(verify_setup))
            .route("/api/v1/auth/2fa/verify-login", post(verify_login))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend listener");
        let addr = listener.local_addr().expect("mock backend local addr");

        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock backend");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            _server: server,
        }
    }

    pub fn counts(&self) -> CallCounts {
        self.state.lock().expect("state lock").counts.clone()
    }

    pub fn auth_config(&self) -> AuthConfig {
        self.auth_config_with_password(ADMIN_PASSWORD)
    }

    pub fn auth_config_with_password(&self, password: &str) -> AuthConfig {
        AuthConfig {
            api_base_url: self.base_url.clone(),
            credentials: Credentials {
                email: ADMIN_EMAIL.to_string(),
                password: password.to_string(),
            },
        }
    }
}

/// Accepts the code for the current or previous time step, so tests do not
/// flake at a step boundary.
fn code_is_valid(code: &str) -> bool {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock after epoch")
        .as_secs();
    code == generate_code_at(TOTP_SECRET, now) || code == generate_code_at(TOTP_SECRET, now - 30)
}

fn bearer_is_valid(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {SETUP_ACCESS_TOKEN}"))
}

fn set_cookie_response(cookie: String) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        cookie.parse().expect("valid cookie header"),
    );
    (StatusCode::OK, headers, axum::Json(json!({"status": "ok"}))).into_response()
}

async fn login(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    let (scenario, enrolled) = {
        let mut s = state.lock().expect("state lock");
        s.counts.login += 1;
        (s.scenario, s.enrolled)
    };

    if body["email"] != ADMIN_EMAIL || body["password"] != ADMIN_PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({"error": "invalid credentials"})),
        )
            .into_response();
    }

    if scenario == Scenario::Malformed {
        return (StatusCode::OK, axum::Json(json!({"status": "ok"}))).into_response();
    }

    if enrolled {
        set_cookie_response(format!("mfa_token={MFA_TOKEN}; Path=/; HttpOnly"))
    } else {
        set_cookie_response(format!("access_token={SETUP_ACCESS_TOKEN}; Path=/; HttpOnly"))
    }
}

async fn two_factor_setup(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    state.lock().expect("state lock").counts.setup += 1;

    if !bearer_is_valid(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({"error": "missing bearer token"})),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        axum::Json(json!({"manualEntryKey": TOTP_SECRET})),
    )
        .into_response()
}

async fn verify_setup(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let scenario = {
        let mut s = state.lock().expect("state lock");
        s.counts.verify_setup += 1;
        s.scenario
    };

    if scenario == Scenario::FailVerifySetup {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({"error": "verify-setup unavailable"})),
        )
            .into_response();
    }

    if !bearer_is_valid(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({"error": "missing bearer token"})),
        )
            .into_response();
    }

    let code = body["code"].as_str().unwrap_or_default();
    if !code_is_valid(code) {
        return (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({"error": "invalid code"})),
        )
            .into_response();
    }

    state.lock().expect("state lock").enrolled = true;
    (StatusCode::OK, axum::Json(json!({"status": "ok"}))).into_response()
}

async fn verify_login(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.lock().expect("state lock").counts.verify_login += 1;

    let has_mfa_cookie = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|cookies| {
            cookies
                .split(';')
                .any(|c| c.trim() == format!("mfa_token={MFA_TOKEN}"))
        });
    if !has_mfa_cookie {
        return (
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({"error": "missing mfa_token cookie"})),
        )
            .into_response();
    }

    let code = body["code"].as_str().unwrap_or_default();
    if !code_is_valid(code) {
        return (
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({"error": "invalid code"})),
        )
            .into_response();
    }

    set_cookie_response(format!("access_token={FINAL_ACCESS_TOKEN}; Path=/; HttpOnly"))
}
