use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use windvane_server::{
    AppState, CacheRegistry, ServerConfig, WeatherClient, WindService, create_router,
};

#[derive(Debug, Parser)]
#[command(name = "windvane-server", about = "Wind lookup service with an expiring result cache")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = match args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };

    // Environment wins over the file for the upstream credential
    if let Ok(key) = std::env::var("WINDVANE_API_KEY") {
        config.weather.api_key = key;
    }

    info!("Starting Windvane Server v{}", env!("CARGO_PKG_VERSION"));

    // Build the registry and wire the wind service to its named cache
    let registry = Arc::new(CacheRegistry::new(config.to_cache_config()));
    let client = WeatherClient::new(config.weather.api_url.clone(), config.weather.api_key.clone());
    let service = Arc::new(WindService::new(client, &registry)?);

    // Create router
    let app = create_router(AppState { service, registry });

    // Bind server
    let addr = config.server_addr();
    info!("Listening on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
