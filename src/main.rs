use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod bedrock;
mod chat;
mod config;
mod prompts;

use bedrock::BedrockService;
use chat::AppState;
use config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // -----------------------------
    // Logging
    // -----------------------------
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    // -----------------------------
    // Configuration (fail fast)
    // -----------------------------
    let config = AppConfig::from_env()?;

    println!("🚀 Starting knowledge-base chat gateway...");

    // -----------------------------
    // Shared state / Dependencies
    // -----------------------------
    let bedrock = Arc::new(BedrockService::new(&config));
    let state = AppState { bedrock };

    // -----------------------------
    // Routers
    // -----------------------------
    let app = chat::router()
        // CORS for frontend
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);

    println!("🌐 HTTP listening on http://{addr}");
    println!("💬 Chat endpoint at http://{addr}/chat");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
