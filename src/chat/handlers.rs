use axum::extract::{Json, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::chat::shaping::{flatten_sources, is_greeting};
use crate::chat::types::{ChatRequest, ChatResponse};
use crate::chat::AppState;

const INDEX_HTML: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/templates/index.html"
));

/// Chat page. No-cache headers so the browser always picks up a fresh
/// build of the page.
pub async fn index() -> impl IntoResponse {
    (
        [
            (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        Html(INDEX_HTML),
    )
}

pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<Value>)> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Empty message" })),
        ));
    }

    info!(chars = message.chars().count(), "chat request");

    // Single attempt; any upstream or decode failure maps uniformly to
    // 500 with the failure text, which the front end surfaces as-is.
    let result = state
        .bedrock
        .retrieve_and_generate(message)
        .await
        .map_err(upstream_error)?;

    // The model tends to hallucinate citation lines for small talk, so
    // greetings never carry sources.
    let sources = if is_greeting(message) {
        Vec::new()
    } else {
        flatten_sources(&result.citations)
    };

    Ok(Json(ChatResponse {
        reply: result.output.text,
        sources,
    }))
}

fn upstream_error(err: anyhow::Error) -> (StatusCode, Json<Value>) {
    error!("retrieve_and_generate failed: {err:#}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": err.to_string() })),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::{Json, State};
    use axum::http::{header, StatusCode};
    use axum::response::IntoResponse;
    use serde_json::json;

    use super::{chat, index, upstream_error};
    use crate::bedrock::BedrockService;
    use crate::chat::types::ChatRequest;
    use crate::chat::AppState;
    use crate::config::AppConfig;

    fn state() -> AppState {
        AppState {
            bedrock: Arc::new(BedrockService::new(&AppConfig {
                access_key_id: "AKIDEXAMPLE".into(),
                secret_access_key: "secret".into(),
                region: "ap-south-1".into(),
                knowledge_base_id: "KB123456".into(),
                model_arn: "arn:aws:bedrock:ap-south-1::foundation-model/test".into(),
                port: 5001,
            })),
        }
    }

    // The empty-message guard sits before the outbound call, so these
    // return without any network in play.
    #[tokio::test]
    async fn whitespace_only_message_is_rejected_with_400() {
        let payload = ChatRequest {
            message: "   \n\t ".into(),
        };
        let (status, Json(body)) = chat(State(state()), Json(payload))
            .await
            .expect_err("blank message must not reach the service");

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Empty message" }));
    }

    #[tokio::test]
    async fn absent_message_is_rejected_with_400() {
        // serde fills a missing "message" key with the empty string.
        let payload: ChatRequest = serde_json::from_str("{}").unwrap();
        let (status, Json(body)) = chat(State(state()), Json(payload))
            .await
            .expect_err("missing message must not reach the service");

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Empty message" }));
    }

    #[test]
    fn upstream_failure_maps_to_500_with_error_only_body() {
        let (status, Json(body)) =
            upstream_error(anyhow::anyhow!("bedrock_error (403): access denied"));

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "bedrock_error (403): access denied");
        // No reply/sources keys alongside the error.
        assert_eq!(body.as_object().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn index_disables_caching() {
        let response = index().await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers[header::CACHE_CONTROL],
            "no-cache, no-store, must-revalidate"
        );
        assert_eq!(headers[header::PRAGMA], "no-cache");
        assert_eq!(headers[header::EXPIRES], "0");
    }
}
