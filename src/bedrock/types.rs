use serde::{Deserialize, Serialize};

// ------------------------------------------------------------
// Request body (retrieveAndGenerate)
// ------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveAndGenerateRequest {
    pub input: InputText,
    pub retrieve_and_generate_configuration: RetrieveAndGenerateConfiguration,
}

#[derive(Debug, Serialize)]
pub struct InputText {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveAndGenerateConfiguration {
    #[serde(rename = "type")]
    pub config_type: &'static str,
    pub knowledge_base_configuration: KnowledgeBaseConfiguration,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBaseConfiguration {
    pub knowledge_base_id: String,
    pub model_arn: String,
    pub generation_configuration: GenerationConfiguration,
    pub retrieval_configuration: RetrievalConfiguration,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfiguration {
    pub prompt_template: PromptTemplate,
    pub inference_config: InferenceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptTemplate {
    pub text_prompt_template: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceConfig {
    pub text_inference_config: TextInferenceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextInferenceConfig {
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub stop_sequences: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalConfiguration {
    pub vector_search_configuration: VectorSearchConfiguration,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorSearchConfiguration {
    pub number_of_results: u32,
}

// ------------------------------------------------------------
// Response body
// ------------------------------------------------------------
// The service omits keys rather than sending nulls, so everything past
// the generated text carries a serde default.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveAndGenerateResponse {
    pub output: GeneratedOutput,
    #[serde(default)]
    pub citations: Vec<Citation>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedOutput {
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    #[serde(default)]
    pub retrieved_references: Vec<RetrievedReference>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievedReference {
    #[serde(default)]
    pub content: ReferenceContent,
    #[serde(default)]
    pub location: Option<ReferenceLocation>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReferenceContent {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceLocation {
    #[serde(default)]
    pub s3_location: Option<S3Location>,
}

#[derive(Debug, Default, Deserialize)]
pub struct S3Location {
    #[serde(default)]
    pub uri: Option<String>,
}

impl RetrievedReference {
    /// Origin locator for the client, `"N/A"` when the service sent none.
    pub fn uri(&self) -> &str {
        self.location
            .as_ref()
            .and_then(|location| location.s3_location.as_ref())
            .and_then(|s3| s3.uri.as_deref())
            .unwrap_or("N/A")
    }
}
