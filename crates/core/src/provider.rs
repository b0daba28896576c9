//! Provider trait: the abstraction over hosted LLM backends.
//!
//! A Provider sends one request and gets one text response back. It is the
//! model invocation boundary: stateless, may fail, may return empty text.
//!
//! Both call shapes of the boundary use the same request type:
//! - *generate*: a single user message and an output token cap
//! - *chat*: a system instruction plus an ordered message list

use crate::conversation::Role;
use crate::error::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A model-facing message. Content only: no timestamps, no ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

impl PromptMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A single request to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model to use (e.g., "gemini-3-flash-preview")
    pub model: String,

    /// System instruction, sent out of band where the API supports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,

    /// The conversation messages, oldest first
    pub messages: Vec<PromptMessage>,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl ProviderRequest {
    /// A one-shot generation request.
    pub fn generate(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_instruction: None,
            messages: vec![PromptMessage::user(prompt)],
            max_output_tokens: None,
        }
    }

    /// A chat request with a system instruction.
    pub fn chat(
        model: impl Into<String>,
        system_instruction: impl Into<String>,
        messages: Vec<PromptMessage>,
    ) -> Self {
        Self {
            model: model.into(),
            system_instruction: Some(system_instruction.into()),
            messages,
            max_output_tokens: None,
        }
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// Generated text. May be empty; callers decide what empty means.
    pub text: String,

    /// Token usage statistics
    pub usage: Option<Usage>,

    /// Which model actually responded (may differ from requested)
    pub model: String,
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The model invocation boundary.
///
/// The engine calls `complete()` without knowing which backend answers.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "gemini").
    fn name(&self) -> &str;

    /// Whether a credential is available. Callers check this before doing
    /// any work so a missing key never reaches the network.
    fn has_credentials(&self) -> bool {
        true
    }

    /// Send a request and get a complete response.
    async fn complete(&self, request: ProviderRequest) -> std::result::Result<ProviderResponse, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_is_single_user_message() {
        let req = ProviderRequest::generate("gemini-3-flash-preview", "Summarize")
            .with_max_output_tokens(8192);
        assert_eq!(req.messages, vec![PromptMessage::user("Summarize")]);
        assert!(req.system_instruction.is_none());
        assert_eq!(req.max_output_tokens, Some(8192));
    }

    #[test]
    fn chat_request_serialization_skips_empty_fields() {
        let req = ProviderRequest::chat("m", "be helpful", vec![PromptMessage::user("hi")]);
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("be helpful"));
        assert!(!json.contains("max_output_tokens"));
    }
}
