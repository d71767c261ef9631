//! Canva Tool Server
//!
//! Registers every Canva endpoint method as a tool and serves the tool
//! directory and tool invocation over HTTP.

use anyhow::Result;
use canva_client::{ApiKeyCredentials, CanvaApp};
use canva_server::api;
use canva_server::config::{LogFormat, ServerConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Initialize tracing
    init_tracing(&config)?;
    info!("Loaded configuration: {:?}", config);

    config.validate()?;

    // The credential is read once and shared immutably by every call
    let credentials = ApiKeyCredentials::from_env(&config.canva.api_key_env)?;
    info!("Using API key from {}", credentials.name());

    let app = CanvaApp::new(config.canva.clone(), Arc::new(credentials))?;
    info!(
        "Registered {} tools against {}",
        app.list_tools().len(),
        app.config().normalized_base_url()
    );

    let router = api::create_router(Arc::new(app));

    // Start server
    let addr = config.bind_address();
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    info!("✓ Server listening on http://{}", addr);
    info!("  Health check: http://{}/health", addr);
    info!("  Tool list: http://{}/v1/tools", addr);
    info!("  Tool call: POST http://{}/v1/tools/{{name}}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(config: &ServerConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "canva_server={level},canva_client={level},tower_http=debug",
            level = config.log_level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.log_format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}
