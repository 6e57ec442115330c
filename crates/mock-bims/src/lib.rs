#![deny(missing_docs)]

//! Mock BIMS identity service.
//!
//! Serves `POST /authenticate` with the same request and response shapes as
//! the production endpoint. Known accounts receive an HS256-signed JWT;
//! anything else receives `401 Unauthorized`.
//!
//! [`spawn_background`] runs any [`Router`] on its own thread and runtime,
//! which lets blocking HTTP clients be exercised against it from plain
//! `#[test]` functions.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// An account the mock accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Account name.
    pub username: String,
    /// Expected password.
    pub password: String,
    /// Tenant / realm the account belongs to.
    pub domain: String,
}

impl Account {
    /// Build an account from its three parts.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            domain: domain.into(),
        }
    }
}

/// Mock service parameters.
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Value of the `iss` claim and the `issuer` response field.
    pub issuer: String,
    /// HMAC secret used to sign tokens.
    pub secret: Vec<u8>,
    /// Token lifetime in seconds.
    pub ttl_secs: i64,
    /// Accepted accounts.
    pub accounts: Vec<Account>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            issuer: "mock-bims".to_string(),
            secret: b"mock-bims-secret".to_vec(),
            ttl_secs: 3600,
            accounts: vec![Account::new("demo", "demo", "demo")],
        }
    }
}

impl MockConfig {
    fn accepts(&self, req: &AuthenticateRequest) -> bool {
        self.accounts.iter().any(|a| {
            a.username == req.username && a.password == req.password && a.domain == req.domain
        })
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures the mock reports to its caller.
#[derive(Debug, thiserror::Error)]
pub enum MockError {
    /// No configured account matches the payload.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The token could not be signed.
    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!(%status, error = %self, "request failed");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

// ---------------------------------------------------------------------------
// Request / response DTOs
// ---------------------------------------------------------------------------

/// Body of `POST /authenticate`.
#[derive(Debug, Deserialize)]
pub struct AuthenticateRequest {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
    /// Tenant / realm.
    pub domain: String,
}

/// Claims carried by the issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Issuer, from [`MockConfig::issuer`].
    pub iss: String,
    /// Authenticated username.
    pub sub: String,
    /// Domain the account belongs to.
    pub domain: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
    /// Unique token id.
    pub jti: String,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the mock router.
pub fn router(config: MockConfig) -> Router {
    Router::new()
        .route("/authenticate", post(authenticate))
        .with_state(Arc::new(config))
}

/// `POST /authenticate` — issue a token for a known account.
async fn authenticate(
    State(config): State<Arc<MockConfig>>,
    Json(req): Json<AuthenticateRequest>,
) -> Result<Json<Value>, MockError> {
    if !config.accepts(&req) {
        return Err(MockError::InvalidCredentials);
    }

    let now = Utc::now();
    let claims = TokenClaims {
        iss: config.issuer.clone(),
        sub: req.username.clone(),
        domain: req.domain.clone(),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(config.ttl_secs)).timestamp(),
        jti: uuid::Uuid::new_v4().to_string(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(&config.secret),
    )?;

    info!(username = %req.username, domain = %req.domain, "token issued");

    Ok(Json(json!({
        "token": token,
        "issuer": config.issuer,
        "expires_in": config.ttl_secs,
    })))
}

// ---------------------------------------------------------------------------
// Background server
// ---------------------------------------------------------------------------

/// Serve `app` on an ephemeral loopback port from a dedicated thread.
///
/// The thread owns a current-thread tokio runtime and lives until the
/// process exits. Returns the bound address once the listener is ready.
///
/// # Errors
///
/// Fails if the thread, runtime or listener cannot be created.
pub fn spawn_background(app: Router) -> std::io::Result<SocketAddr> {
    let (tx, rx) = std::sync::mpsc::channel();

    std::thread::Builder::new()
        .name("mock-bims".into())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    let _ = tx.send(Err(e));
                    return;
                }
            };

            runtime.block_on(async move {
                let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
                    Ok(l) => l,
                    Err(e) => {
                        let _ = tx.send(Err(e));
                        return;
                    }
                };
                let _ = tx.send(listener.local_addr());
                if let Err(e) = axum::serve(listener, app).await {
                    warn!(error = %e, "mock server stopped");
                }
            });
        })?;

    rx.recv().map_err(std::io::Error::other)?
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
