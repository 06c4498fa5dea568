use anyhow::Result;
use tracing::info;

use patient_portal::config::Config;
use patient_portal::server::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patient_portal=info".parse()?),
        )
        .init();

    info!("Starting patient portal");

    // Load configuration from environment
    let config = Config::from_env()?;
    let port = config.port;

    info!(
        "Serving locales {:?} (default '{}')",
        config.supported_locales, config.default_locale
    );

    let state = AppState::from_config(config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
