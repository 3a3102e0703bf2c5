use emotion_sense::{api::start_server, Config, Orchestrator};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    info!("EmotionSense - API Server");
    info!("Port: {}", config.port);

    if config.remote_enabled() {
        info!(endpoint = %config.gemini_endpoint, "Gemini analysis enabled");
    } else {
        warn!("GEMINI_API_KEY not set, every request will use the local analyzer");
    }

    let orchestrator = Arc::new(Orchestrator::from_config(&config));

    info!("Starting API server...");
    start_server(orchestrator, config.port).await?;

    Ok(())
}
