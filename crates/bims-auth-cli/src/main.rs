//! `bims-auth` — obtain an access token from the BIMS identity service.
//!
//! ```text
//! BIMS_PASSWORD=… bims-auth --username jdoe --domain acme --token-only
//! ```

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use bims_auth::{AuthClient, AuthResponse, ClientConfig};
use clap::Parser;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "bims-auth")]
#[command(about = "Exchange BIMS credentials for a signed access token")]
#[command(author, version, long_about = None)]
struct Cli {
    /// Account name
    #[arg(short, long)]
    username: String,

    /// Tenant / realm of the account
    #[arg(short, long)]
    domain: String,

    /// Account password
    #[arg(short, long, env = "BIMS_PASSWORD", hide_env_values = true)]
    password: String,

    /// Identity endpoint (defaults to the production URL)
    #[arg(long, env = "BIMS_AUTH_URL")]
    endpoint: Option<String>,

    /// Request timeout in seconds, 0 to wait indefinitely
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print only the token instead of the full response body
    #[arg(long, default_value_t = false)]
    token_only: bool,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout((secs > 0).then(|| Duration::from_secs(secs)));
        }
        config
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let client = AuthClient::new(cli.client_config());
    debug!(endpoint = %client.config().endpoint, "using identity endpoint");

    let response = client
        .authenticate(&cli.username, &cli.password, &cli.domain)
        .with_context(|| format!("authentication against {} failed", client.config().endpoint))?;

    report(&response, cli.token_only)
}

fn report(response: &AuthResponse, token_only: bool) -> Result<ExitCode> {
    let Some(result) = response.result() else {
        if response.is_rejected() {
            eprintln!(
                "authentication rejected: {} {}",
                response.status,
                response.reason.as_deref().unwrap_or("")
            );
        } else {
            eprintln!("authentication succeeded but the service returned no body");
        }
        return Ok(ExitCode::FAILURE);
    };

    if token_only {
        let Some(token) = result.token() else {
            eprintln!("response did not contain a token");
            return Ok(ExitCode::FAILURE);
        };
        println!("{token}");
    } else {
        println!("{}", serde_json::to_string_pretty(result)?);
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_required_arguments() {
        let cli = Cli::try_parse_from([
            "bims-auth",
            "--username",
            "jdoe",
            "--domain",
            "acme",
            "--password",
            "s3cret",
        ])
        .unwrap();
        assert_eq!(cli.username, "jdoe");
        assert_eq!(cli.domain, "acme");
        assert!(!cli.token_only);
    }

    #[test]
    fn endpoint_and_timeout_override_config() {
        let cli = Cli::try_parse_from([
            "bims-auth",
            "-u",
            "jdoe",
            "-d",
            "acme",
            "-p",
            "x",
            "--endpoint",
            "http://localhost:4100/authenticate",
            "--timeout-secs",
            "0",
        ])
        .unwrap();
        let config = cli.client_config();
        assert_eq!(config.endpoint, "http://localhost:4100/authenticate");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn rejection_exits_with_failure() {
        let response = AuthResponse {
            status: 401,
            reason: Some("Unauthorized".into()),
            result: None,
        };
        assert_eq!(report(&response, false).unwrap(), ExitCode::FAILURE);
    }
}
