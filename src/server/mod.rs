pub mod handlers;
pub mod types;

use crate::{Result, config::Config, llm::GeminiClient};
use axum::{
    Router,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/gemini", post(handlers::relay))
        .route("/api/ask", post(handlers::ask))
        .route("/api/questions", get(handlers::questions))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let llm = GeminiClient::new(&config.llm)?;
    let app_state = AppState::new(Arc::new(llm), config.llm.model.clone());

    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {} (model: {})", addr, config.llm.model);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
