//! Gemini `generateContent` client.
//!
//! # Responsibility
//! - Build JSON-mode requests with a response schema per use case.
//! - Extract the generated text and decode it into typed results.
//!
//! # Invariants
//! - The API key travels in a request header, never in the URL or logs.
//! - Blank prompts are rejected before any network traffic.

use crate::assistant::{
    require_prompt, AssistantError, AssistantReply, CaptionDraft, ContentGenerator,
};
use crate::config::AssistantConfig;
use crate::logging::summarize_for_log;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const API_KEY_HEADER: &str = "x-goog-api-key";
const JSON_MIME_TYPE: &str = "application/json";
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub(crate) enum SchemaType {
    Object,
    String,
    Array,
}

/// Subset of the OpenAPI schema dialect the service accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Schema {
    #[serde(rename = "type")]
    kind: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<BTreeMap<&'static str, Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    required: Option<Vec<&'static str>>,
}

impl Schema {
    fn bare(kind: SchemaType) -> Self {
        Self {
            kind,
            description: None,
            properties: None,
            items: None,
            required: None,
        }
    }

    fn string(description: &'static str) -> Self {
        Self {
            description: Some(description),
            ..Self::bare(SchemaType::String)
        }
    }

    fn string_list(description: &'static str) -> Self {
        Self {
            description: Some(description),
            items: Some(Box::new(Self::bare(SchemaType::String))),
            ..Self::bare(SchemaType::Array)
        }
    }

    fn object(fields: Vec<(&'static str, Schema)>) -> Self {
        let required = fields.iter().map(|(name, _)| *name).collect();
        Self {
            kind: SchemaType::Object,
            description: None,
            properties: Some(fields.into_iter().collect()),
            items: None,
            required: Some(required),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Schema,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// HTTP client for the Gemini API.
pub struct GeminiClient {
    http: Client,
    config: AssistantConfig,
}

impl GeminiClient {
    pub fn new(config: AssistantConfig) -> Self {
        Self::with_http_client(Client::new(), config)
    }

    pub fn with_http_client(http: Client, config: AssistantConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{model}:generateContent",
            self.config.base_url
        )
    }

    async fn generate_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        model: &str,
        prompt: String,
        schema: Schema,
    ) -> Result<T, AssistantError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AssistantError::MissingApiKey)?;

        info!(
            "event=ai_request module=assistant status=started operation={operation} model={model} prompt_chars={}",
            prompt.chars().count()
        );
        let response = self
            .http
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, api_key)
            .json(&build_request(prompt, schema))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::HttpStatus {
                status: status.as_u16(),
                body: summarize_for_log(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        let envelope: GenerateContentResponse = response.json().await?;
        let text = extract_text(&envelope)?;
        debug!(
            "event=ai_response module=assistant status=ok operation={operation} text_chars={}",
            text.chars().count()
        );
        decode_payload(&text)
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate_caption(&self, topic: &str) -> Result<CaptionDraft, AssistantError> {
        let topic = require_prompt(topic)?;
        self.generate_json(
            "caption",
            &self.config.caption_model,
            caption_prompt(topic),
            caption_schema(),
        )
        .await
    }

    async fn assist(&self, prompt: &str, context: &str) -> Result<AssistantReply, AssistantError> {
        let prompt = require_prompt(prompt)?;
        self.generate_json(
            "assist",
            &self.config.assistant_model,
            assistant_prompt(prompt, context),
            assistant_schema(),
        )
        .await
    }
}

pub(crate) fn caption_prompt(topic: &str) -> String {
    format!(
        "Generate an engaging Instagram caption and relevant hashtags for the following topic: {topic}.\n\
         Focus on making the caption catchy and include a mix of popular and niche hashtags."
    )
}

pub(crate) fn assistant_prompt(prompt: &str, context: &str) -> String {
    format!(
        "You are a productivity assistant in a Notion-like workspace.\n\
         Context: {context}\n\
         User Request: {prompt}"
    )
}

pub(crate) fn caption_schema() -> Schema {
    Schema::object(vec![
        ("caption", Schema::string("The generated Instagram caption.")),
        (
            "hashtags",
            Schema::string_list("A list of relevant hashtags."),
        ),
    ])
}

pub(crate) fn assistant_schema() -> Schema {
    Schema::object(vec![
        (
            "content",
            Schema::string("The main body of generated text, formatted in clean markdown."),
        ),
        (
            "suggestions",
            Schema::string_list("3 short follow-up suggestions for the user."),
        ),
    ])
}

pub(crate) fn build_request(prompt: String, schema: Schema) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![RequestContent {
            role: "user",
            parts: vec![RequestPart { text: prompt }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: JSON_MIME_TYPE,
            response_schema: schema,
        },
    }
}

/// Concatenates the text parts of the first candidate.
pub(crate) fn extract_text(response: &GenerateContentResponse) -> Result<String, AssistantError> {
    let text = response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AssistantError::EmptyResponse);
    }
    Ok(text)
}

pub(crate) fn decode_payload<T: DeserializeOwned>(text: &str) -> Result<T, AssistantError> {
    serde_json::from_str(text.trim()).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::{
        assistant_prompt, build_request, caption_prompt, caption_schema, decode_payload,
        extract_text, GeminiClient, GenerateContentResponse,
    };
    use crate::assistant::{AssistantError, CaptionDraft, ContentGenerator};
    use crate::config::AssistantConfig;
    use serde_json::json;

    #[test]
    fn request_carries_json_mode_and_schema() {
        let request = build_request(caption_prompt("coffee"), caption_schema());
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["role"], "user");
        assert!(value["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("topic: coffee."));
        let config = &value["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["type"], "OBJECT");
        assert_eq!(
            config["responseSchema"]["properties"]["hashtags"]["items"]["type"],
            "STRING"
        );
        assert_eq!(
            config["responseSchema"]["required"],
            json!(["caption", "hashtags"])
        );
    }

    #[test]
    fn assistant_prompt_embeds_context_and_request() {
        let prompt = assistant_prompt("summarize goals", "Key Goals page");
        assert!(prompt.contains("Context: Key Goals page"));
        assert!(prompt.contains("User Request: summarize goals"));
    }

    #[test]
    fn extract_text_joins_first_candidate_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "{\"caption\":" }, { "text": "\"hi\",\"hashtags\":[\"#a\"]}" } ] } },
                { "content": { "parts": [ { "text": "ignored" } ] } }
            ]
        }))
        .unwrap();

        let text = extract_text(&response).unwrap();
        let draft: CaptionDraft = decode_payload(&text).unwrap();
        assert_eq!(draft.caption, "hi");
        assert_eq!(draft.hashtags, vec!["#a".to_string()]);
    }

    #[test]
    fn extract_text_reports_empty_response() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert!(matches!(
            extract_text(&response),
            Err(AssistantError::EmptyResponse)
        ));

        let blank: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [ { "content": { "parts": [ { "text": "  " } ] } } ]
        }))
        .unwrap();
        assert!(matches!(
            extract_text(&blank),
            Err(AssistantError::EmptyResponse)
        ));
    }

    #[test]
    fn decode_payload_reports_malformed_json() {
        let result = decode_payload::<CaptionDraft>("{\"caption\": 3}");
        assert!(matches!(result, Err(AssistantError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn missing_api_key_fails_without_network() {
        let client = GeminiClient::new(AssistantConfig::default());
        let err = client.generate_caption("coffee").await.unwrap_err();
        assert!(matches!(err, AssistantError::MissingApiKey));
    }

    #[tokio::test]
    async fn blank_prompt_is_rejected_before_key_check() {
        let client = GeminiClient::new(AssistantConfig::default());
        let err = client.assist("   ", "").await.unwrap_err();
        assert!(matches!(err, AssistantError::InvalidPrompt));
    }
}
