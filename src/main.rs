use std::sync::Arc;

use ai_assistant_backend::{config::Config, routes, state::AppState};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt().with_max_level(config.log_level).with_target(false).init();

    if config.api_key.is_none() {
        warn!("AI_GATEWAY_API_KEY is not set; every AI request will fail until it is configured");
    }

    let state = Arc::new(AppState::from_config(&config)?);
    let app = routes::create_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    info!("AI assistant running at http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
