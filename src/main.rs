use std::env;
use std::path::PathBuf;

use tokio::net::TcpListener;

use anyhow::anyhow;

use xfyun_sign::{ServerConfig, create_app, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    // Handle CLI arguments
    let mut config_path = env::var("CONFIG_FILE").ok().map(PathBuf::from);
    let mut args = env::args();
    let _ = args.next();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" | "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                config_path = Some(PathBuf::from(path));
            }
            other => {
                anyhow::bail!("Unknown argument '{other}'. Supported options: --config <file>");
            }
        }
    }

    // Load configuration
    let config = match &config_path {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path.display());
            ServerConfig::from_file(path)
        }
        None => ServerConfig::from_env(),
    }
    .map_err(|e| anyhow!(e.to_string()))?;

    for protocol in config.missing_credentials() {
        tracing::warn!(
            protocol = %protocol,
            section = protocol.credential_section(),
            "Credentials incomplete; signing requests for this protocol will fail"
        );
    }
    tracing::info!(
        enabled = config.encryption_enabled,
        "Result encryption {}",
        if config.encryption_enabled { "enabled" } else { "disabled" }
    );

    let address = config.address();

    // Create application state
    let app_state = AppState::new(config);
    let app = create_app(app_state);

    // Create listener
    let listener = TcpListener::bind(&address).await?;

    tracing::info!("Server listening on {address}");

    // Start server
    axum::serve(listener, app).await?;

    Ok(())
}
