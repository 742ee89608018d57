// NOTE:
// The assistant prompt is configuration, not logic. It lives under
// prompts/ so wording changes never touch the shaping code. The managed
// service fills in the $search_results$ / $output_format_instructions$
// placeholders itself.

pub const LEGAL_ASSISTANT_PROMPT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/legal_assistant.txt"
));
