use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use exam_api::{config::AppConfig, routes, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting ExamPilot API service");

    let config = AppConfig::load()?;
    info!("Configuration loaded: {:?}", config);

    let app_state = AppState::connect(&config).await;

    let app = routes::create_router(app_state)
        .layer(routes::cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http());

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("ExamPilot API service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
