//! Client error types.
//!
//! [`AuthError`] is returned by every fallible operation in this crate.
//! A rejection by the identity service (any status other than `200 OK`) is
//! **not** an error: it surfaces as an [`AuthResponse`](crate::AuthResponse)
//! with no result.

/// Error type for authentication exchanges.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The exchange failed at the transport level (connect, DNS, TLS,
    /// timeout, or reading the response body).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The credential payload could not be encoded before sending, or a
    /// `200 OK` body was not a JSON object (or `null`).
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The HTTP client could not be built from the configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl AuthError {
    /// `true` for connection, TLS, timeout and body-read failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// `true` when a success body (or the outgoing payload) was not valid JSON.
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization(_))
    }
}
