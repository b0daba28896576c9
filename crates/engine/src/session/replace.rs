//! Smart replace: fill a template's placeholders from a data source.

use crate::analyst::Analyst;
use crate::outcome::Outcome;
use crate::prompt::TaskKind;
use auditflow_core::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartReplace {
    pub template: String,
    pub data_source: String,
    pub instruction: String,
}

impl Default for SmartReplace {
    /// The sample shown to a first-time user.
    fn default() -> Self {
        Self {
            template: "Dear [Client Name],\n\nWe have analyzed your audit for [Fiscal Year] and found [Key Finding].\n\nSincerely,\nAuditFlow Team".into(),
            data_source: "Client: Acme Corp\nYear: 2024\nFinding: 15% discrepancy in logistics overhead.".into(),
            instruction: "Replace placeholders. Maintain a professional, formal tone.".into(),
        }
    }
}

impl SmartReplace {
    pub fn new(
        template: impl Into<String>,
        data_source: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            template: template.into(),
            data_source: data_source.into(),
            instruction: instruction.into(),
        }
    }

    /// Run the substitution. Blank inputs are sent as-is.
    pub async fn run(&self, analyst: &Analyst) -> Result<Outcome> {
        analyst.ensure_credentials()?;
        let payload = analyst.builder().smart_replace(
            &self.template,
            &self.data_source,
            &self.instruction,
            analyst.config(),
        );
        Ok(analyst.generate(TaskKind::SmartReplace, payload).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use auditflow_core::error::Error;

    #[tokio::test]
    async fn run_returns_filled_text() {
        let (provider, analyst) = shared_analyst(ScriptedProvider::texts(&["Dear Acme Corp,"]));
        let outcome = SmartReplace::default().run(&analyst).await.unwrap();
        assert_eq!(outcome.display_text(), "Dear Acme Corp,");

        let prompt = &provider.last_request().unwrap().messages[0].content;
        assert!(prompt.contains("TEMPLATE:\nDear [Client Name],"));
        assert!(prompt.contains("Finding: 15% discrepancy"));
    }

    #[tokio::test]
    async fn empty_output_uses_placeholder() {
        let analyst = analyst_with(ScriptedProvider::texts(&[""]));
        let outcome = SmartReplace::new("t", "d", "i").run(&analyst).await.unwrap();
        assert_eq!(outcome.display_text(), "Failed to process smart replace.");
    }

    #[tokio::test]
    async fn missing_credentials() {
        let analyst = analyst_with(ScriptedProvider::without_credentials());
        let err = SmartReplace::default().run(&analyst).await.unwrap_err();
        assert!(matches!(err, Error::CredentialMissing));
    }
}
