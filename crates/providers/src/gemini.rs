//! Gemini provider implementation.
//!
//! Talks to the `models/{model}:generateContent` REST endpoint. One request
//! carries the whole conversation: the API is stateless, so chat history and
//! context travel with every call.
//!
//! Role mapping: user → `user`, assistant → `model`. The system instruction
//! goes in the dedicated `systemInstruction` field.

use async_trait::async_trait;
use auditflow_core::conversation::Role;
use auditflow_core::error::ProviderError;
use auditflow_core::provider::*;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
const DEFAULT_RETRY_AFTER_SECS: u64 = 5;

/// A Gemini REST API provider.
pub struct GeminiProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a provider against the public endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            client: build_client(DEFAULT_TIMEOUT),
        }
    }

    /// Point the provider at a different endpoint (proxies, test servers).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_client(timeout);
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Convert a request into the Gemini wire format.
    fn to_api_request(request: &ProviderRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: request
                .messages
                .iter()
                .map(|m| Content {
                    role: match m.role {
                        Role::User => "user".into(),
                        Role::Assistant => "model".into(),
                    },
                    parts: vec![Part {
                        text: m.content.clone(),
                    }],
                })
                .collect(),
            system_instruction: request.system_instruction.as_ref().map(|text| SystemContent {
                parts: vec![Part { text: text.clone() }],
            }),
            generation_config: request.max_output_tokens.map(|max| GenerationConfig {
                max_output_tokens: max,
            }),
        }
    }
}

fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "Falling back to default HTTP client");
            reqwest::Client::new()
        })
}

#[async_trait]
impl auditflow_core::Provider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        if !self.has_credentials() {
            return Err(ProviderError::NotConfigured(
                "no API key configured for gemini".into(),
            ));
        }

        let body = Self::to_api_request(&request);

        debug!(
            provider = "gemini",
            model = %request.model,
            messages = request.messages.len(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(e.to_string())
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited {
                retry_after_secs: parse_retry_after(response.headers())
                    .unwrap_or(DEFAULT_RETRY_AFTER_SECS),
            });
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Gemini returned error");
            return Err(map_http_error(status, &request.model, &error_body));
        }

        let api_response: GenerateContentResponse =
            response.json().await.map_err(|e| {
                // The client timeout also covers reading the body.
                if e.is_timeout() {
                    ProviderError::Timeout(e.to_string())
                } else {
                    ProviderError::ApiError {
                        status_code: 200,
                        message: format!("Failed to parse response: {e}"),
                    }
                }
            })?;

        Ok(into_provider_response(api_response, &request.model))
    }
}

/// Flatten the first candidate's text parts. Missing candidates give empty
/// text rather than an error: the caller decides what empty output means.
fn into_provider_response(api: GenerateContentResponse, requested_model: &str) -> ProviderResponse {
    let text = api
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let usage = api.usage_metadata.map(|u| Usage {
        prompt_tokens: u.prompt_token_count,
        completion_tokens: u.candidates_token_count,
        total_tokens: u.total_token_count,
    });

    ProviderResponse {
        text,
        usage,
        model: api
            .model_version
            .unwrap_or_else(|| requested_model.to_string()),
    }
}

fn map_http_error(status: u16, model: &str, body: &str) -> ProviderError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .and_then(|w| {
            let msg = w.error.message?;
            Some(match w.error.status {
                Some(s) if !s.is_empty() => format!("{s}: {msg}"),
                _ => msg,
            })
        })
        .unwrap_or_else(|| body.to_string());

    match status {
        401 | 403 => ProviderError::AuthenticationFailed(message),
        404 => ProviderError::ModelNotFound(model.to_string()),
        _ => ProviderError::ApiError {
            status_code: status,
            message,
        },
    }
}

fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    headers.get("retry-after")?.to_str().ok()?.trim().parse().ok()
}

// --- Gemini API types (internal) ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct SystemContent {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use auditflow_core::Provider;

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let provider = GeminiProvider::new("k").with_base_url("http://localhost:9999/v1beta/");
        assert_eq!(
            provider.endpoint("gemini-3-flash-preview"),
            "http://localhost:9999/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn request_conversion_maps_roles_and_system_instruction() {
        let request = ProviderRequest::chat(
            "gemini-3-flash-preview",
            "Answer from context.",
            vec![
                PromptMessage::user("CONTEXT DOCUMENTS:\nabc"),
                PromptMessage::assistant("ack"),
                PromptMessage::user("question"),
            ],
        );
        let json = serde_json::to_value(GeminiProvider::to_api_request(&request)).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][1]["role"], "model");
        assert_eq!(json["contents"][2]["parts"][0]["text"], "question");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "Answer from context.");
        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn generate_request_carries_token_cap() {
        let request = ProviderRequest::generate("m", "prompt").with_max_output_tokens(8192);
        let json = serde_json::to_value(GeminiProvider::to_api_request(&request)).unwrap();
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 8192);
        assert!(json.get("systemInstruction").is_none());
    }

    #[test]
    fn parse_response_joins_text_parts() {
        let data = r#"{
            "candidates": [{"content": {"role": "model", "parts": [{"text": "Hello, "}, {"text": "world"}]}}],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 4, "totalTokenCount": 14},
            "modelVersion": "gemini-3-flash-preview-001"
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(data).unwrap();
        let response = into_provider_response(parsed, "gemini-3-flash-preview");
        assert_eq!(response.text, "Hello, world");
        assert_eq!(response.model, "gemini-3-flash-preview-001");
        assert_eq!(response.usage.unwrap().total_tokens, 14);
    }

    #[test]
    fn parse_response_without_candidates_is_empty_text() {
        let data = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(data).unwrap();
        let response = into_provider_response(parsed, "m");
        assert!(response.text.is_empty());
        assert_eq!(response.model, "m");
    }

    #[test]
    fn http_errors_are_classified() {
        let body = r#"{"error": {"code": 400, "message": "Invalid argument", "status": "INVALID_ARGUMENT"}}"#;
        match map_http_error(400, "m", body) {
            ProviderError::ApiError { status_code, message } => {
                assert_eq!(status_code, 400);
                assert_eq!(message, "INVALID_ARGUMENT: Invalid argument");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(matches!(
            map_http_error(403, "m", "denied"),
            ProviderError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            map_http_error(404, "nope", ""),
            ProviderError::ModelNotFound(ref m) if m == "nope"
        ));
    }

    #[tokio::test]
    async fn missing_key_short_circuits_without_network() {
        // Unroutable base URL: if a request were attempted it would fail
        // with a network error, not NotConfigured.
        let provider = GeminiProvider::new("").with_base_url("http://127.0.0.1:1");
        let err = provider
            .complete(ProviderRequest::generate("m", "hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
        assert!(!provider.has_credentials());
    }

    #[tokio::test]
    async fn stalled_body_is_a_timeout() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            // Headers promise a body that never finishes arriving.
            let head = "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 1000\r\n\r\n{";
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.flush().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let provider = GeminiProvider::new("key")
            .with_base_url(&format!("http://{addr}"))
            .with_timeout(Duration::from_millis(300));
        let err = provider
            .complete(ProviderRequest::generate("m", "hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Timeout(_)), "got {err:?}");
        server.abort();
    }
}
