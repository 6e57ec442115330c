//! Result of an authentication exchange.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Token and metadata returned by the identity service on `200 OK`.
///
/// The body is an external contract, so the structure is open: every field
/// the service returns is kept verbatim, `token` included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthResult {
    /// Every field of the response body.
    pub fields: Map<String, Value>,
}

impl AuthResult {
    /// Look up any field of the response body by name, `token` included.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// The signed JWT, when the service returned a string under `token`.
    pub fn token(&self) -> Option<&str> {
        self.field("token").and_then(Value::as_str)
    }
}

/// Outcome of one call to [`AuthClient::authenticate`](crate::AuthClient::authenticate).
///
/// `result` is `None` when the service answered with anything other than
/// `200 OK`, or with `200 OK` and an empty or `null` body. `status` and
/// `reason` tell those cases apart.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthResponse {
    /// HTTP status code returned by the service.
    pub status: u16,
    /// Canonical reason phrase for `status`, when one exists.
    pub reason: Option<String>,
    /// Deserialized body of a `200 OK` response.
    pub result: Option<AuthResult>,
}

impl AuthResponse {
    /// `true` when the service answered `200 OK`.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// `true` when the service answered with any other status.
    pub fn is_rejected(&self) -> bool {
        !self.is_success()
    }

    /// Borrow the result, if any.
    pub fn result(&self) -> Option<&AuthResult> {
        self.result.as_ref()
    }

    /// Drop the status and keep only the (possibly absent) result.
    pub fn into_result(self) -> Option<AuthResult> {
        self.result
    }
}
