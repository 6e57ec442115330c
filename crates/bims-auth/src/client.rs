//! Blocking client for the BIMS identity endpoint.
//!
//! [`AuthClient`] performs one credential exchange per call:
//!
//! 1. Serializes [`Credentials`] as a JSON object.
//! 2. POSTs it to the configured endpoint.
//! 3. On `200 OK`, deserializes the body into an [`AuthResult`].
//!
//! Any other status is reported, not raised: the call returns an
//! [`AuthResponse`] without a result and logs the status at `WARN`.
//!
//! # Typical usage
//!
//! ```rust,no_run
//! use bims_auth::AuthClient;
//!
//! # fn run() -> Result<(), bims_auth::AuthError> {
//! let client = AuthClient::from_env();
//! let response = client.authenticate("jdoe", "s3cret", "acme")?;
//!
//! match response.result() {
//!     Some(result) => println!("token: {:?}", result.token()),
//!     None => eprintln!("rejected with HTTP {}", response.status),
//! }
//! # Ok(())
//! # }
//! ```

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::error::AuthError;
use crate::response::{AuthResponse, AuthResult};

/// Stateless client for the identity endpoint.
///
/// Holds configuration only. Every call builds its own HTTP client and
/// drops it before returning, so no connection outlives the call and
/// concurrent calls share nothing.
#[derive(Debug, Clone, Default)]
pub struct AuthClient {
    config: ClientConfig,
}

impl AuthClient {
    /// Create a client with the given configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Create a client configured from the environment
    /// (see [`ClientConfig::from_env`]).
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }

    /// The configuration in use.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Exchange a username, password and domain for an access token.
    ///
    /// Returns `Ok` with `result: Some(_)` on `200 OK` with a JSON body,
    /// and `Ok` with `result: None` on `200 OK` with an empty or `null`
    /// body or on any other status.
    ///
    /// # Errors
    ///
    /// * [`AuthError::Transport`] if the endpoint cannot be reached or the
    ///   exchange fails mid-flight (including timeouts).
    /// * [`AuthError::Serialization`] if a `200 OK` body is not a JSON object.
    /// * [`AuthError::Config`] if the HTTP client cannot be built.
    ///
    /// # Panics
    ///
    /// This is a blocking call. Like every `reqwest::blocking` client it
    /// panics when invoked from inside an async runtime; wrap it in
    /// `spawn_blocking` there.
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
        domain: &str,
    ) -> Result<AuthResponse, AuthError> {
        self.authenticate_with(&Credentials::new(username, password, domain))
    }

    /// Same as [`authenticate`](Self::authenticate), taking a prepared
    /// [`Credentials`] payload.
    ///
    /// # Errors
    ///
    /// See [`authenticate`](Self::authenticate).
    pub fn authenticate_with(&self, credentials: &Credentials) -> Result<AuthResponse, AuthError> {
        let payload = encode_payload(credentials)?;

        // Scoped to this call; dropping it closes its connections on every path.
        let http = self.http_client()?;

        debug!(
            endpoint = %self.config.endpoint,
            username = %credentials.username,
            domain = %credentials.domain,
            "sending authentication request"
        );

        let res = http
            .post(&self.config.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()?;

        let status = res.status();
        let reason = status.canonical_reason().map(str::to_string);

        if status != StatusCode::OK {
            if let Err(e) = res.bytes() {
                debug!(error = %e, "failed to drain rejected response body");
            }
            warn!(
                status = status.as_u16(),
                reason = reason.as_deref().unwrap_or(""),
                endpoint = %self.config.endpoint,
                "authentication rejected"
            );
            return Ok(AuthResponse {
                status: status.as_u16(),
                reason,
                result: None,
            });
        }

        let body = res.bytes()?;
        let result = parse_body(&body)?;

        debug!(has_result = result.is_some(), "authentication succeeded");

        Ok(AuthResponse {
            status: status.as_u16(),
            reason,
            result,
        })
    }

    fn http_client(&self) -> Result<Client, AuthError> {
        let builder = Client::builder().timeout(self.config.timeout);
        let builder = if self.config.disable_proxy {
            builder.no_proxy()
        } else {
            builder
        };
        builder.build().map_err(|e| AuthError::Config(e.to_string()))
    }
}

/// Exchange credentials using [`ClientConfig::from_env`].
///
/// # Errors
///
/// See [`AuthClient::authenticate`].
pub fn authenticate(
    username: &str,
    password: &str,
    domain: &str,
) -> Result<AuthResponse, AuthError> {
    AuthClient::from_env().authenticate(username, password, domain)
}

fn encode_payload(credentials: &Credentials) -> Result<Vec<u8>, AuthError> {
    Ok(serde_json::to_vec(credentials)?)
}

/// A success body that is empty or `null` means "no result", not an error.
fn parse_body(body: &[u8]) -> Result<Option<AuthResult>, AuthError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(serde_json::from_slice(body)?)
}
