//! The model call site.
//!
//! [`Analyst`] owns the provider, the current [`AnalysisConfig`], and the
//! assembler and builder configured for it. Sessions borrow it for each
//! request. It is the only place that turns provider results into
//! [`Outcome`]s.

use crate::context::{ContextAssembler, ContextBudget};
use crate::outcome::Outcome;
use crate::prompt::{ChatPayload, PromptBuilder, TaskKind, TextPayload};
use auditflow_config::AppConfig;
use auditflow_core::analysis::{AnalysisConfig, Language, is_supported_model};
use auditflow_core::error::{Error, ProviderError, Result};
use auditflow_core::provider::{Provider, ProviderRequest, ProviderResponse};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct Analyst {
    provider: Arc<dyn Provider>,
    config: AnalysisConfig,
    assembler: ContextAssembler,
    builder: PromptBuilder,
}

impl Analyst {
    /// Default budgets and output cap.
    pub fn new(provider: Arc<dyn Provider>, config: AnalysisConfig) -> Self {
        Self {
            provider,
            config,
            assembler: ContextAssembler::default(),
            builder: PromptBuilder::default(),
        }
    }

    /// Wire the configured provider, budgets, model and language.
    pub fn from_config(app: &AppConfig) -> Self {
        Self::new(auditflow_providers::build_from_config(app), app.analysis())
            .with_budget(ContextBudget::from(&app.budgets))
            .with_max_output_tokens(app.max_output_tokens)
    }

    pub fn with_budget(mut self, budget: ContextBudget) -> Self {
        self.assembler = ContextAssembler::new(budget);
        self
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.builder = PromptBuilder::new(max);
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next request.
    ///
    /// A blank model is accepted and resolves to the default; any other id
    /// must be one of the supported models.
    pub fn set_config(&mut self, config: AnalysisConfig) -> Result<()> {
        if !is_supported_model(config.resolved_model()) {
            warn!(model = %config.model, "Rejected unsupported model");
            return Err(Error::UnsupportedModel(config.model));
        }
        self.apply(config);
        Ok(())
    }

    pub fn set_model(&mut self, model: impl Into<String>) -> Result<()> {
        self.set_config(AnalysisConfig::new(model, self.config.language))
    }

    pub fn toggle_language(&mut self) -> Language {
        let config = AnalysisConfig::new(self.config.model.clone(), self.config.language.toggle());
        self.apply(config);
        self.config.language
    }

    fn apply(&mut self, config: AnalysisConfig) {
        debug!(model = %config.model, language = %config.language, "Analysis config updated");
        self.config = config;
    }

    pub fn assembler(&self) -> &ContextAssembler {
        &self.assembler
    }

    pub fn builder(&self) -> &PromptBuilder {
        &self.builder
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Fails with [`Error::CredentialMissing`] when the provider has no key.
    /// Callers check this before assembling anything.
    pub fn ensure_credentials(&self) -> Result<()> {
        if self.provider.has_credentials() {
            Ok(())
        } else {
            Err(Error::CredentialMissing)
        }
    }

    /// Run a single-shot task.
    pub async fn generate(&self, task: TaskKind, payload: TextPayload) -> Outcome {
        debug!(task = %task, model = %payload.model, prompt_chars = payload.prompt.len(), "Generating");
        let result = self.provider.complete(payload.into()).await;
        Self::to_outcome(task, result)
    }

    /// Run a chat turn.
    pub async fn converse(&self, payload: ChatPayload) -> Outcome {
        debug!(model = %payload.model, messages = payload.messages.len(), "Chatting");
        let request: ProviderRequest = payload.into();
        let result = self.provider.complete(request).await;
        Self::to_outcome(TaskKind::Chat, result)
    }

    fn to_outcome(
        task: TaskKind,
        result: std::result::Result<ProviderResponse, ProviderError>,
    ) -> Outcome {
        match result {
            Ok(response) if response.text.trim().is_empty() => {
                debug!(task = %task, "Model returned empty output");
                Outcome::Empty {
                    placeholder: task.empty_placeholder().to_string(),
                }
            }
            Ok(response) => Outcome::Generated {
                text: response.text,
            },
            Err(e) => {
                warn!(task = %task, error = %e, "Model call failed");
                Outcome::Failed {
                    message: task.failure_message(&e),
                }
            }
        }
    }
}

impl std::fmt::Debug for Analyst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyst")
            .field("provider", &self.provider.name())
            .field("config", &self.config)
            .field("assembler", &self.assembler)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn payload() -> TextPayload {
        TextPayload {
            model: "m".into(),
            prompt: "p".into(),
            max_output_tokens: None,
        }
    }

    #[tokio::test]
    async fn generated_text_is_returned() {
        let analyst = analyst_with(ScriptedProvider::texts(&["report"]));
        let outcome = analyst.generate(TaskKind::DeepSummary, payload()).await;
        assert_eq!(outcome, Outcome::generated("report"));
    }

    #[tokio::test]
    async fn blank_output_maps_to_placeholder() {
        let analyst = analyst_with(ScriptedProvider::texts(&["   "]));
        let outcome = analyst.generate(TaskKind::NoteMagic, payload()).await;
        assert_eq!(
            outcome,
            Outcome::Empty {
                placeholder: "Magic failed.".into()
            }
        );
    }

    #[tokio::test]
    async fn provider_error_maps_to_failed() {
        let analyst = analyst_with(ScriptedProvider::new(vec![Err(ProviderError::Timeout(
            "120s".into(),
        ))]));
        let outcome = analyst.generate(TaskKind::DeepSummary, payload()).await;
        assert_eq!(outcome.display_text(), "Error generating summary: Request timed out: 120s");
        assert!(outcome.is_failed());
    }

    #[test]
    fn missing_credentials_are_reported() {
        let analyst = analyst_with(ScriptedProvider::without_credentials());
        assert!(matches!(analyst.ensure_credentials(), Err(Error::CredentialMissing)));
    }

    #[test]
    fn config_changes_apply() {
        let mut analyst = analyst_with(ScriptedProvider::texts(&[]));
        assert_eq!(analyst.toggle_language(), Language::TraditionalChinese);
        analyst.set_model("gemini-3-pro-preview").unwrap();
        assert_eq!(analyst.config().model, "gemini-3-pro-preview");
        assert_eq!(analyst.config().language, Language::TraditionalChinese);
    }

    #[tokio::test]
    async fn unknown_model_is_rejected_before_any_call() {
        let (provider, mut analyst) = shared_analyst(ScriptedProvider::texts(&["ok"]));
        analyst.set_model("gemini-3-pro-preview").unwrap();

        let err = analyst.set_model("gpt-4o").unwrap_err();
        assert!(matches!(err, Error::UnsupportedModel(ref m) if m == "gpt-4o"));
        assert_eq!(analyst.config().model, "gemini-3-pro-preview");

        assert!(matches!(
            analyst.set_config(AnalysisConfig::new("typo", Language::English)),
            Err(Error::UnsupportedModel(_))
        ));
        assert_eq!(analyst.config().language, Language::English);

        let payload = analyst.builder().note_transform("raw", analyst.config());
        analyst.generate(TaskKind::NoteTransform, payload).await;
        assert_eq!(provider.last_request().unwrap().model, "gemini-3-pro-preview");
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn blank_model_resolves_to_default() {
        let mut analyst = analyst_with(ScriptedProvider::texts(&[]));
        analyst.set_model("  ").unwrap();
        assert_eq!(analyst.config().resolved_model(), "gemini-3-flash-preview");
    }

    #[test]
    fn from_config_applies_budgets() {
        let mut app = AppConfig::default();
        app.budgets.chat_chars = 10;
        app.language = Language::TraditionalChinese;
        let analyst = Analyst::from_config(&app);
        assert_eq!(analyst.assembler().budget().chat_chars, 10);
        assert_eq!(analyst.config().language, Language::TraditionalChinese);
        assert_eq!(analyst.provider_name(), "gemini");
    }
}
