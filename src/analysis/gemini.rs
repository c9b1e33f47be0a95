//! Direct REST client for Gemini `generateContent` with structured JSON output.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::prompt::{build_prompt, response_schema};
use super::{AnalysisError, Analyzer, parse_payload};
use crate::config::AnalyzerConfig;
use crate::models::AnalysisResult;

const API_KEY_HEADER: &str = "x-goog-api-key";
const JSON_MIME_TYPE: &str = "application/json";

#[derive(Clone, Debug)]
pub struct GeminiClient {
    client: Client,
    config: AnalyzerConfig,
}

impl GeminiClient {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { client: Client::new(), config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.config.base_url, self.config.model)
    }

    async fn send_request(
        &self,
        api_key: &str,
        body: &GenerateContentRequest,
    ) -> Result<String, AnalysisError> {
        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(map_http_error(status, &body_text));
        }

        let body_text = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body_text)?;
        extract_text_response(parsed)
    }
}

#[async_trait]
impl Analyzer for GeminiClient {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        let api_key = self.config.api_key().ok_or(AnalysisError::MissingCredential)?;
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let request = build_request(text, self.config.temperature);
        tracing::debug!(model = %self.config.model, chars = text.chars().count(), "sending analysis request");

        let payload = self.send_request(api_key, &request).await.inspect_err(|err| {
            tracing::error!(model = %self.config.model, error = %err, "analysis request failed");
        })?;

        let result = parse_payload(&payload)?;
        tracing::debug!(sentiment = %result.sentiment(), score = result.score(), "analysis parsed");
        Ok(result)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn build_request(text: &str, temperature: f32) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![Part { text: build_prompt(text) }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: JSON_MIME_TYPE,
            response_schema: response_schema(),
            temperature,
        },
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text_response(response: GenerateContentResponse) -> Result<String, AnalysisError> {
    let text: String = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() { Err(AnalysisError::EmptyResponse) } else { Ok(text) }
}

fn map_http_error(status: StatusCode, body: &str) -> AnalysisError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status_text.is_empty() { msg } else { format!("{status_text}: {msg}") }
        })
        .unwrap_or_else(|_| body.to_string());

    AnalysisError::Api { status: status.as_u16(), message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_from(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(build_request("Great service", 0.3)).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("\"Great service\""));

        let generation = &body["generationConfig"];
        assert_eq!(generation["responseMimeType"], "application/json");
        assert_eq!(generation["responseSchema"]["type"], "OBJECT");
        assert!((generation["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_endpoint_uses_model() {
        let config = AnalyzerConfig::default()
            .with_base_url("http://localhost:9999/v1beta/models")
            .with_model("gemini-test");
        let client = GeminiClient::new(config);
        assert_eq!(client.endpoint(), "http://localhost:9999/v1beta/models/gemini-test:generateContent");
    }

    #[test]
    fn test_extract_text_single_part() {
        let response = response_from(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":1}"}],"role":"model"}}]}"#,
        );
        assert_eq!(extract_text_response(response).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response = response_from(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]}}]}"#,
        );
        assert_eq!(extract_text_response(response).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_extract_text_no_candidates() {
        assert!(matches!(
            extract_text_response(response_from(r#"{}"#)),
            Err(AnalysisError::EmptyResponse)
        ));
        assert!(matches!(
            extract_text_response(response_from(r#"{"candidates":[]}"#)),
            Err(AnalysisError::EmptyResponse)
        ));
    }

    #[test]
    fn test_extract_text_candidate_without_content() {
        let response = response_from(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#);
        assert!(matches!(extract_text_response(response), Err(AnalysisError::EmptyResponse)));
    }

    #[test]
    fn test_map_http_error_with_envelope() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        match map_http_error(StatusCode::BAD_REQUEST, body) {
            AnalysisError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "INVALID_ARGUMENT: API key not valid.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_map_http_error_plain_body() {
        match map_http_error(StatusCode::BAD_GATEWAY, "upstream unavailable") {
            AnalysisError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_analyze_without_credential_fails_fast() {
        // Unroutable base URL: the call must fail before any network I/O
        let config = AnalyzerConfig::new(None).with_base_url("http://127.0.0.1:1/models");
        let client = GeminiClient::new(config);

        let err = client.analyze("I love this product!").await.unwrap_err();
        assert!(matches!(err, AnalysisError::MissingCredential));
    }

    #[tokio::test]
    async fn test_analyze_blank_input() {
        let config = AnalyzerConfig::new(Some("key".to_string()));
        let client = GeminiClient::new(config);

        let err = client.analyze("  \t ").await.unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyInput));
    }
}
