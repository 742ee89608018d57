use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::bedrock::BedrockService;

pub mod handlers;
pub mod shaping;
pub mod types;

#[derive(Clone)]
pub struct AppState {
    pub bedrock: Arc<BedrockService>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/chat", post(handlers::chat))
}
