//! Document views: one file, or a stack of files.

use super::chat_round;
use crate::analyst::Analyst;
use crate::context::ContextMode;
use crate::outcome::Outcome;
use crate::prompt::TaskKind;
use auditflow_config::AppConfig;
use auditflow_core::conversation::{CapacityPolicy, ConversationLog};
use auditflow_core::document::{Document, DocumentCollection, DocumentId};
use auditflow_core::error::Result;
use auditflow_core::extract::{FileUpload, TextExtractor};
use auditflow_extract::{ExtractionFailure, extract_batch};
use tracing::{debug, info};

/// Characters shown by [`DocumentSession::preview`] unless configured.
pub const DEFAULT_PREVIEW_CHARS: usize = 5_000;

/// The working set of one document view plus its report and chat.
///
/// In [`ContextMode::Single`] the session holds at most one document and
/// its raw text is the context. In [`ContextMode::Multi`] documents stack
/// up and every one is labeled in the context.
#[derive(Debug, Clone)]
pub struct DocumentSession {
    mode: ContextMode,
    documents: DocumentCollection,
    summary: Option<String>,
    log: ConversationLog,
    preview_chars: usize,
}

impl DocumentSession {
    pub fn new(mode: ContextMode, policy: CapacityPolicy) -> Self {
        Self {
            mode,
            documents: DocumentCollection::new(),
            summary: None,
            log: ConversationLog::with_policy(policy),
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }

    /// Capacity policy and preview length from the app config.
    pub fn from_config(mode: ContextMode, app: &AppConfig) -> Self {
        Self::new(mode, app.conversation.capacity_policy())
            .with_preview_chars(app.budgets.preview_chars)
    }

    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }

    pub fn single(policy: CapacityPolicy) -> Self {
        Self::new(ContextMode::Single, policy)
    }

    pub fn multi(policy: CapacityPolicy) -> Self {
        Self::new(ContextMode::Multi, policy)
    }

    pub fn mode(&self) -> ContextMode {
        self.mode
    }

    pub fn documents(&self) -> &DocumentCollection {
        &self.documents
    }

    /// The last generated report.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// The start of a document's text, cut at the configured preview length.
    pub fn preview(&self, id: &DocumentId) -> Option<&str> {
        self.documents.get(id).map(|d| d.preview(self.preview_chars))
    }

    // ── Documents ─────────────────────────────────────────────────────

    /// Extract `files` and add the successes.
    ///
    /// Multi mode appends in input order. Single mode keeps only the first
    /// success and replaces whatever was loaded, discarding the old report
    /// and chat with it. Failures are returned, never fatal.
    pub async fn upload(
        &mut self,
        extractor: &dyn TextExtractor,
        files: &[FileUpload],
    ) -> Result<Vec<ExtractionFailure>> {
        let batch = extract_batch(extractor, files).await;

        match self.mode {
            ContextMode::Multi => {
                self.documents.extend(batch.documents)?;
            }
            ContextMode::Single => {
                if let Some(document) = batch.documents.into_iter().next() {
                    self.discard();
                    self.documents.add(document)?;
                }
            }
        }

        info!(
            mode = ?self.mode,
            documents = self.documents.len(),
            failed = batch.failures.len(),
            "Upload processed"
        );
        Ok(batch.failures)
    }

    /// Add an already-extracted document. In single mode it replaces the
    /// current one.
    pub fn add_document(&mut self, document: Document) -> Result<()> {
        if self.mode == ContextMode::Single {
            self.discard();
        }
        self.documents.add(document)
    }

    /// Remove a document. The report and chat are left alone: they describe
    /// what was sent at the time.
    pub fn remove_document(&mut self, id: &DocumentId) -> Option<Document> {
        let removed = self.documents.remove(id);
        if let Some(doc) = &removed {
            debug!(document = %doc.display_name(), "Document removed");
        }
        removed
    }

    /// Drop everything: documents, report, chat.
    pub fn discard(&mut self) {
        self.documents.clear();
        self.summary = None;
        self.log.clear();
    }

    // ── Requests ──────────────────────────────────────────────────────

    /// Generate the audit report over all current documents.
    ///
    /// Only generated text replaces the stored report; placeholders and
    /// failures leave the previous one in place.
    pub async fn generate_report(&mut self, analyst: &Analyst) -> Result<Option<Outcome>> {
        analyst.ensure_credentials()?;
        if self.documents.is_empty() {
            return Ok(None);
        }

        let context = analyst
            .assembler()
            .summary_context(self.documents.as_slice(), self.mode);
        let payload = analyst.builder().deep_summary(&context, analyst.config());
        let outcome = analyst.generate(TaskKind::DeepSummary, payload).await;

        if let Some(text) = outcome.text() {
            self.summary = Some(text.to_string());
        }
        Ok(Some(outcome))
    }

    /// Ask a question about the current documents.
    pub async fn chat(&mut self, analyst: &Analyst, query: &str) -> Result<Option<Outcome>> {
        analyst.ensure_credentials()?;
        if query.trim().is_empty() {
            return Ok(None);
        }

        let context = analyst
            .assembler()
            .chat_context(self.documents.as_slice(), self.mode);
        Ok(Some(chat_round(analyst, &mut self.log, &context, query).await))
    }
}
