use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// One retrieved passage backing the reply. `id` is the 1-based ordinal
/// of the enclosing citation, so references grouped under the same
/// citation share it.
#[derive(Debug, PartialEq, Serialize)]
pub struct SourceEntry {
    pub id: usize,
    pub snippet: String,
    pub file: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// HTML as produced by the generation service; relayed unvalidated.
    pub reply: String,
    pub sources: Vec<SourceEntry>,
}
