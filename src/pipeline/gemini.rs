//! Gemini `generateContent` client: the only stage with network I/O.
//!
//! The service is reached through the [`AnalysisService`] trait so the
//! analyzer and state machine can be driven by an in-process fake in tests.
//! [`GeminiClient`] is the real implementation over `reqwest`.
//!
//! One call, one attempt: no retries, no streaming. The overall deadline is
//! applied by [`crate::Analyzer`], not here.

use crate::error::AnalyzerError;
use crate::pipeline::request::AnalysisRequest;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("laudo-analyzer/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// The external generation endpoint, seen as a black box.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Send one request and return the generated text verbatim.
    async fn generate(
        &self,
        api_key: &str,
        request: &AnalysisRequest,
    ) -> Result<String, AnalyzerError>;
}

/// HTTP client for the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
}

impl GeminiClient {
    /// Build a client rooted at `base_url` (e.g. `https://generativelanguage.googleapis.com`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, AnalyzerError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Reuse an existing `reqwest::Client`.
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl AnalysisService for GeminiClient {
    async fn generate(
        &self,
        api_key: &str,
        request: &AnalysisRequest,
    ) -> Result<String, AnalyzerError> {
        let url = self.endpoint(request.model());
        debug!("POST {} ({} bytes payload)", url, request.payload().len());

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request.to_wire())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| body.chars().take(200).collect());
            warn!("Gemini returned HTTP {}: {}", status.as_u16(), message);
            return Err(AnalyzerError::ApiStatus {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| AnalyzerError::MalformedResponse(e.to_string()))?;

        if let Some(ref usage) = parsed.usage_metadata {
            debug!(
                "Gemini usage: {} prompt tokens, {} output tokens",
                usage.prompt_token_count.unwrap_or(0),
                usage.candidates_token_count.unwrap_or(0)
            );
        }

        parsed.into_text()
    }
}

// ── Response wire types ──────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
    /// Reasoning summaries from thinking models; not part of the answer.
    #[serde(default)]
    pub thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u64>,
    pub candidates_token_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GenerateContentResponse {
    /// Concatenated answer text of the first candidate, if it has any.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let texts: Vec<&str> = parts
            .iter()
            .filter(|p| !p.thought)
            .filter_map(|p| p.text.as_deref())
            .collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    fn into_text(self) -> Result<String, AnalyzerError> {
        if let Some(text) = self.text() {
            return Ok(text);
        }
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(AnalyzerError::Blocked { reason });
        }
        if let Some(reason) = self.candidates.first().and_then(|c| c.finish_reason.clone()) {
            debug!("Empty candidate, finish reason {}", reason);
        }
        Err(AnalyzerError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ok_body(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 1200, "candidatesTokenCount": 800 }
        })
    }

    #[test]
    fn text_concatenates_parts_and_skips_thoughts() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [
                { "text": "thinking…", "thought": true },
                { "text": "### 1. " },
                { "text": "RESUMO" }
            ]}}]
        }))
        .unwrap();
        assert_eq!(resp.text().as_deref(), Some("### 1. RESUMO"));
    }

    #[test]
    fn blocked_prompt_is_reported() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        assert!(matches!(
            resp.into_text(),
            Err(AnalyzerError::Blocked { ref reason }) if reason == "SAFETY"
        ));
    }

    #[test]
    fn no_candidates_is_empty_response() {
        let resp = GenerateContentResponse::default();
        assert!(matches!(resp.into_text(), Err(AnalyzerError::EmptyResponse)));
    }

    #[tokio::test]
    async fn posts_to_model_endpoint_with_key_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "fake-key"))
            .and(body_partial_json(json!({
                "contents": [{ "parts": [
                    { "inlineData": { "mimeType": "application/pdf", "data": "JVBERg==" } }
                ]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body("### 1. RESUMO")))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(server.uri()).unwrap();
        let req = AnalysisRequest::new("gemini-2.5-flash", "JVBERg==");
        let text = client.generate("fake-key", &req).await.unwrap();
        assert_eq!(text, "### 1. RESUMO");
    }

    #[tokio::test]
    async fn http_error_carries_service_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT" }
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::new(server.uri()).unwrap();
        let err = client
            .generate("bad", &AnalysisRequest::new("m", "QQ=="))
            .await
            .unwrap_err();
        match err {
            AnalyzerError::ApiStatus { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_success_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
            .mount(&server)
            .await;

        let client = GeminiClient::new(server.uri()).unwrap();
        let err = client
            .generate("k", &AnalysisRequest::new("m", "QQ=="))
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::MalformedResponse(_)));
    }
}
