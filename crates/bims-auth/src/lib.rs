//! # BIMS auth
//!
//! Blocking client that exchanges a username, password and domain for a
//! signed access token (JWT) issued by the Barchart BIMS identity service.
//!
//! The crate provides:
//!
//! * [`AuthClient`] — performs one `POST /authenticate` exchange per call.
//! * [`Credentials`] — the JSON credential payload (password redacted in
//!   `Debug`).
//! * [`AuthResult`] / [`AuthResponse`] — the deserialized token body and
//!   the HTTP status it arrived with.
//! * [`AuthError`] — transport, serialization and configuration failures.
//! * [`ClientConfig`] — endpoint and timeout, overridable from the
//!   environment.
//!
//! ## Rejections are not errors
//!
//! A status other than `200 OK` returns `Ok` with no result. Callers that
//! only look at [`AuthResponse::into_result`] cannot tell invalid
//! credentials from an outage; [`AuthResponse::status`] and
//! [`AuthResponse::reason`] can.
//!
//! # Quick start
//!
//! ```rust,no_run
//! let response = bims_auth::authenticate("jdoe", "s3cret", "acme")?;
//! if let Some(token) = response.result().and_then(|r| r.token()) {
//!     println!("Bearer {token}");
//! }
//! # Ok::<(), bims_auth::AuthError>(())
//! ```

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod response;

pub use client::{authenticate, AuthClient};
pub use config::ClientConfig;
pub use credentials::Credentials;
pub use error::AuthError;
pub use response::{AuthResponse, AuthResult};
