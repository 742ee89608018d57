//! Post-processing of the raw retrieve-and-generate result: greeting
//! detection (greetings get no sources) and flattening of citations
//! into client-facing source entries.

use crate::bedrock::types::Citation;
use crate::chat::types::SourceEntry;

// Substring containment on the lowercased message. Deliberately not a
// word match: "this" contains "hi" and still counts as a greeting. That
// matches the deployed behavior and the front end depends on it.
const GREETING_KEYWORDS: &[&str] = &[
    "hi",
    "hello",
    "hii",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
    "what is your name",
    "who are you",
    "what can you do",
    "your name",
    "how are you",
];

const SNIPPET_MAX_CHARS: usize = 500;

pub fn is_greeting(message: &str) -> bool {
    let lower = message.trim().to_lowercase();
    GREETING_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Flattens every retrieved reference across all citations, in encounter
/// order. The entry id is the enclosing citation's 1-based ordinal, not
/// a running counter over references.
pub fn flatten_sources(citations: &[Citation]) -> Vec<SourceEntry> {
    let mut sources = Vec::new();
    for (index, citation) in citations.iter().enumerate() {
        for reference in &citation.retrieved_references {
            sources.push(SourceEntry {
                id: index + 1,
                snippet: truncate_snippet(&reference.content.text),
                file: reference.uri().to_string(),
            });
        }
    }
    sources
}

// Char-based, not byte-based: slicing bytes could split a UTF-8
// sequence in retrieved regulatory text.
fn truncate_snippet(text: &str) -> String {
    let mut chars = text.char_indices();
    match chars.nth(SNIPPET_MAX_CHARS) {
        None => text.to_string(),
        Some((byte_offset, _)) => format!("{}...", &text[..byte_offset]),
    }
}
