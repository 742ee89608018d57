//! Client for the managed retrieve-and-generate service (AWS Bedrock
//! knowledge bases). Retrieval, ranking, and generation all happen on
//! the service side; this module only builds the request and relays the
//! result.

use anyhow::{anyhow, Result};
use chrono::Utc;

use crate::config::AppConfig;
use crate::prompts;

pub mod sigv4;
pub mod types;

use sigv4::{RequestToSign, SigningParams};
use types::{
    GenerationConfiguration, InferenceConfig, InputText, KnowledgeBaseConfiguration,
    PromptTemplate, RetrievalConfiguration, RetrieveAndGenerateConfiguration,
    RetrieveAndGenerateRequest, RetrieveAndGenerateResponse, TextInferenceConfig,
    VectorSearchConfiguration,
};

const SIGNING_SERVICE: &str = "bedrock";
const API_PATH: &str = "/retrieveAndGenerate";
const CONTENT_TYPE_JSON: &str = "application/json";

// Generation and retrieval parameters are fixed, never derived from input.
const MAX_TOKENS: u32 = 6000;
const TEMPERATURE: f64 = 0.0;
const TOP_P: f64 = 0.99;
const NUMBER_OF_RESULTS: u32 = 10;

pub struct BedrockService {
    client: reqwest::Client,
    host: String,
    endpoint: String,
    region: String,
    access_key_id: String,
    secret_access_key: String,
    knowledge_base_id: String,
    model_arn: String,
}

impl BedrockService {
    pub fn new(config: &AppConfig) -> Self {
        let host = format!("bedrock-agent-runtime.{}.amazonaws.com", config.region);
        let endpoint = format!("https://{host}{API_PATH}");
        Self {
            client: reqwest::Client::new(),
            host,
            endpoint,
            region: config.region.clone(),
            access_key_id: config.access_key_id.clone(),
            secret_access_key: config.secret_access_key.clone(),
            knowledge_base_id: config.knowledge_base_id.clone(),
            model_arn: config.model_arn.clone(),
        }
    }

    /// Assembles the retrieveAndGenerate body for a trimmed, non-empty
    /// user message. The message goes through verbatim; everything else
    /// is fixed configuration.
    fn build_request(&self, message: &str) -> RetrieveAndGenerateRequest {
        RetrieveAndGenerateRequest {
            input: InputText {
                text: message.to_string(),
            },
            retrieve_and_generate_configuration: RetrieveAndGenerateConfiguration {
                config_type: "KNOWLEDGE_BASE",
                knowledge_base_configuration: KnowledgeBaseConfiguration {
                    knowledge_base_id: self.knowledge_base_id.clone(),
                    model_arn: self.model_arn.clone(),
                    generation_configuration: GenerationConfiguration {
                        prompt_template: PromptTemplate {
                            text_prompt_template: prompts::LEGAL_ASSISTANT_PROMPT.to_string(),
                        },
                        inference_config: InferenceConfig {
                            text_inference_config: TextInferenceConfig {
                                max_tokens: MAX_TOKENS,
                                temperature: TEMPERATURE,
                                top_p: TOP_P,
                                stop_sequences: Vec::new(),
                            },
                        },
                    },
                    retrieval_configuration: RetrievalConfiguration {
                        vector_search_configuration: VectorSearchConfiguration {
                            number_of_results: NUMBER_OF_RESULTS,
                        },
                    },
                },
            },
        }
    }

    /// Single attempt, no retry: the caller turns any failure here into
    /// one uniform upstream error.
    pub async fn retrieve_and_generate(
        &self,
        message: &str,
    ) -> Result<RetrieveAndGenerateResponse> {
        let body = serde_json::to_vec(&self.build_request(message))?;
        let amz_date = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();

        let authorization = sigv4::authorization_header(
            &SigningParams {
                access_key_id: &self.access_key_id,
                secret_access_key: &self.secret_access_key,
                region: &self.region,
                service: SIGNING_SERVICE,
            },
            &RequestToSign {
                method: "POST",
                host: &self.host,
                path: API_PATH,
                query: "",
                content_type: CONTENT_TYPE_JSON,
                body: &body,
                amz_date: &amz_date,
            },
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE_JSON)
            .header("x-amz-date", &amz_date)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("bedrock_error ({status}): {text}"));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::BedrockService;
    use crate::config::AppConfig;

    fn service() -> BedrockService {
        BedrockService::new(&AppConfig {
            access_key_id: "AKIDEXAMPLE".into(),
            secret_access_key: "secret".into(),
            region: "ap-south-1".into(),
            knowledge_base_id: "KB123456".into(),
            model_arn: "arn:aws:bedrock:ap-south-1::foundation-model/test".into(),
            port: 5001,
        })
    }

    #[test]
    fn endpoint_derived_from_region() {
        let service = service();
        assert_eq!(
            service.endpoint,
            "https://bedrock-agent-runtime.ap-south-1.amazonaws.com/retrieveAndGenerate"
        );
    }

    #[test]
    fn request_carries_message_verbatim_and_fixed_params() {
        let service = service();
        let message = "  What are <b>POSP</b> KYC rules? \"quotes\" & ampersands  ";
        let body = serde_json::to_value(service.build_request(message)).unwrap();

        // No escaping or trimming inside the builder.
        assert_eq!(body["input"]["text"], message);

        let kb_config =
            &body["retrieveAndGenerateConfiguration"]["knowledgeBaseConfiguration"];
        assert_eq!(
            body["retrieveAndGenerateConfiguration"]["type"],
            "KNOWLEDGE_BASE"
        );
        assert_eq!(kb_config["knowledgeBaseId"], "KB123456");
        assert_eq!(
            kb_config["modelArn"],
            "arn:aws:bedrock:ap-south-1::foundation-model/test"
        );

        let inference =
            &kb_config["generationConfiguration"]["inferenceConfig"]["textInferenceConfig"];
        assert_eq!(inference["maxTokens"], 6000);
        assert_eq!(inference["temperature"], 0.0);
        assert_eq!(inference["topP"], 0.99);
        assert_eq!(inference["stopSequences"].as_array().unwrap().len(), 0);

        assert_eq!(
            kb_config["retrievalConfiguration"]["vectorSearchConfiguration"]
                ["numberOfResults"],
            10
        );
    }

    #[test]
    fn request_embeds_prompt_template() {
        let service = service();
        let body = serde_json::to_value(service.build_request("hello")).unwrap();
        let template = body["retrieveAndGenerateConfiguration"]["knowledgeBaseConfiguration"]
            ["generationConfiguration"]["promptTemplate"]["textPromptTemplate"]
            .as_str()
            .unwrap();
        assert!(template.contains("$search_results$"));
    }
}
