//! Payload construction per task kind.
//!
//! Every payload carries exactly one language directive. For single-shot
//! tasks it is the first line of the prompt; for chat it closes the system
//! instruction.

use super::MagicKind;
use super::templates;
use crate::context::AssembledContext;
use auditflow_core::analysis::AnalysisConfig;
use auditflow_core::conversation::ConversationTurn;
use auditflow_core::provider::{PromptMessage, ProviderRequest};
use serde::{Deserialize, Serialize};

/// Output cap for deep summaries.
pub const DEFAULT_SUMMARY_MAX_OUTPUT_TOKENS: u32 = 8192;

/// A single-shot generation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPayload {
    pub model: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// A chat payload: system instruction plus the model-facing message list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPayload {
    pub model: String,
    pub system_instruction: String,
    pub messages: Vec<PromptMessage>,
}

impl From<TextPayload> for ProviderRequest {
    fn from(payload: TextPayload) -> Self {
        let request = ProviderRequest::generate(payload.model, payload.prompt);
        match payload.max_output_tokens {
            Some(max) => request.with_max_output_tokens(max),
            None => request,
        }
    }
}

impl From<ChatPayload> for ProviderRequest {
    fn from(payload: ChatPayload) -> Self {
        ProviderRequest::chat(payload.model, payload.system_instruction, payload.messages)
    }
}

/// Builds payloads. Holds no per-call state.
#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder {
    summary_max_output_tokens: u32,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SUMMARY_MAX_OUTPUT_TOKENS)
    }
}

impl PromptBuilder {
    pub fn new(summary_max_output_tokens: u32) -> Self {
        Self {
            summary_max_output_tokens,
        }
    }

    /// Audit report over an already-bounded context.
    pub fn deep_summary(&self, context: &AssembledContext, config: &AnalysisConfig) -> TextPayload {
        TextPayload {
            model: config.resolved_model().to_string(),
            prompt: templates::deep_summary(config.language.directive(), &context.text),
            max_output_tokens: Some(self.summary_max_output_tokens),
        }
    }

    /// Chat over a bounded context.
    ///
    /// The message list is: priming user turn carrying the context, priming
    /// assistant acknowledgement, the prior `history`, then `query`.
    pub fn chat(
        &self,
        query: &str,
        context: &AssembledContext,
        history: &[ConversationTurn],
        config: &AnalysisConfig,
    ) -> ChatPayload {
        let mut messages = Vec::with_capacity(history.len() + 3);
        messages.push(PromptMessage::user(format!(
            "{}{}",
            templates::CHAT_CONTEXT_HEADER,
            context.text
        )));
        messages.push(PromptMessage::assistant(templates::CHAT_ACKNOWLEDGEMENT));
        messages.extend(history.iter().map(|turn| PromptMessage {
            role: turn.role(),
            content: turn.content().to_string(),
        }));
        messages.push(PromptMessage::user(query));

        ChatPayload {
            model: config.resolved_model().to_string(),
            system_instruction: templates::chat_system(config.language.directive()),
            messages,
        }
    }

    pub fn smart_replace(
        &self,
        template: &str,
        data_source: &str,
        instruction: &str,
        config: &AnalysisConfig,
    ) -> TextPayload {
        self.unbounded(templates::smart_replace(
            config.language.directive(),
            template,
            data_source,
            instruction,
        ), config)
    }

    pub fn note_transform(&self, raw_note: &str, config: &AnalysisConfig) -> TextPayload {
        self.unbounded(templates::note_transform(config.language.directive(), raw_note), config)
    }

    pub fn note_magic(&self, note: &str, kind: MagicKind, config: &AnalysisConfig) -> TextPayload {
        self.unbounded(
            templates::note_magic(config.language.directive(), kind.instruction(), note),
            config,
        )
    }

    fn unbounded(&self, prompt: String, config: &AnalysisConfig) -> TextPayload {
        TextPayload {
            model: config.resolved_model().to_string(),
            prompt,
            max_output_tokens: None,
        }
    }
}
