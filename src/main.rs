//! Main entry point for the Affiliate Image Studio

use affiliate_studio::{
    api,
    config::{LoggingConfig, Settings},
    generation::GeminiClient,
    AppState,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "pretty" {
        registry.with(fmt::layer().pretty()).init();
    } else {
        registry.with(fmt::layer().json()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::load()?;
    init_logging(&settings.logging);

    info!("Starting Affiliate Image Studio");

    // A missing API key stops the process here, before anything is served
    if let Err(e) = settings.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }
    info!(
        "Loaded configuration: server={}:{}",
        settings.server.host, settings.server.port
    );

    let client = GeminiClient::new(&settings.gemini)?;
    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    let app_state = Arc::new(AppState::new(settings, Arc::new(client)));

    // Build the router
    let app = api::routes::create_router(app_state);

    info!("Server listening on {}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
