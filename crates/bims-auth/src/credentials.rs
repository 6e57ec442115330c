//! Credential payload sent to the identity service.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Username, password and domain exchanged for an access token.
///
/// Serializes to a JSON object with exactly the keys `username`,
/// `password` and `domain`. Values are passed through untouched; the
/// identity service is responsible for validating them.
///
/// The [`Debug`] implementation redacts the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account name.
    pub username: String,
    /// Account password. Never logged.
    pub password: String,
    /// Tenant / realm the account belongs to.
    pub domain: String,
}

impl Credentials {
    /// Build a credential payload from its three parts.
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

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("domain", &self.domain)
            .finish()
    }
}
