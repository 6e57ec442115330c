//! Mock BIMS identity service binary.
//!
//! Listens on `MOCK_BIMS_PORT` (default `4100`) and accepts the account
//! `demo` / `demo` / `demo`.

use mock_bims::{router, MockConfig};
use tracing::info;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("MOCK_BIMS_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(4100);

    let app = router(MockConfig::default());

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(address = %addr, "mock-bims listening on POST /authenticate");
    axum::serve(listener, app).await
}
