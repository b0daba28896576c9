//! Context assembler: documents in, bounded string out.
//!
//! # Determinism
//!
//! Assembly is a pure function of the documents, the mode and the budget.
//! Nothing time-dependent participates.

use auditflow_config::BudgetConfig;
use auditflow_core::document::Document;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prefix of the note-keeper chat context.
const NOTE_CONTEXT_HEADER: &str = "CURRENT NOTE CONTENT:\n";

// ── Types ─────────────────────────────────────────────────────────────────

/// Character budgets per use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextBudget {
    /// Document content slice for deep summaries.
    pub summary_chars: usize,
    /// Context resent with every chat call.
    pub chat_chars: usize,
}

impl Default for ContextBudget {
    fn default() -> Self {
        Self {
            summary_chars: 100_000,
            chat_chars: 50_000,
        }
    }
}

impl From<&BudgetConfig> for ContextBudget {
    fn from(config: &BudgetConfig) -> Self {
        Self {
            summary_chars: config.summary_chars,
            chat_chars: config.chat_chars,
        }
    }
}

/// How document boundaries are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextMode {
    /// First document's raw text, unlabeled.
    Single,
    /// Every document wrapped in start/end markers.
    Multi,
}

/// The assembled, bounded context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembledContext {
    /// Bounded text, at most `budget` characters.
    pub text: String,
    /// Labeled sections rendered before truncation (0 in single mode).
    pub sections: usize,
    /// Character count before truncation.
    pub total_chars: usize,
    /// Whether the budget cut anything.
    pub truncated: bool,
}

impl AssembledContext {
    fn bounded(full: String, sections: usize, budget: usize) -> Self {
        let total_chars = full.chars().count();
        if total_chars <= budget {
            return Self {
                text: full,
                sections,
                total_chars,
                truncated: false,
            };
        }

        debug!(budget, total_chars, sections, "Truncating assembled context");
        Self {
            text: truncate(&full, budget).to_string(),
            sections,
            total_chars,
            truncated: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

// ── Free functions ────────────────────────────────────────────────────────

/// Hard cut at `budget` characters. Never splits a UTF-8 sequence.
///
/// Idempotent: `truncate(truncate(s, b), b) == truncate(s, b)`.
pub fn truncate(text: &str, budget: usize) -> &str {
    match text.char_indices().nth(budget) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// One labeled multi-document section, trailing newline included.
pub fn render_section(document: &Document) -> String {
    format!(
        "--- START FILE: {} ---\n{}\n--- END FILE ---\n",
        document.display_name(),
        document.text()
    )
}

// ── Assembler ─────────────────────────────────────────────────────────────

/// The context assembler. Stateless apart from its budgets.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextAssembler {
    budget: ContextBudget,
}

impl ContextAssembler {
    pub fn new(budget: ContextBudget) -> Self {
        Self { budget }
    }

    pub fn budget(&self) -> ContextBudget {
        self.budget
    }

    /// Assemble `documents` in `mode`, bounded to `budget` characters.
    pub fn assemble(&self, documents: &[Document], mode: ContextMode, budget: usize) -> AssembledContext {
        match mode {
            ContextMode::Multi => self.assemble_multi(documents, budget),
            ContextMode::Single => self.assemble_single(documents.first(), budget),
        }
    }

    /// Labeled sections in collection order, joined by a newline.
    pub fn assemble_multi(&self, documents: &[Document], budget: usize) -> AssembledContext {
        let full = documents
            .iter()
            .map(render_section)
            .collect::<Vec<_>>()
            .join("\n");
        AssembledContext::bounded(full, documents.len(), budget)
    }

    /// Raw passthrough. No document yields an empty context.
    pub fn assemble_single(&self, document: Option<&Document>, budget: usize) -> AssembledContext {
        let full = document.map(|d| d.text().to_string()).unwrap_or_default();
        AssembledContext::bounded(full, 0, budget)
    }

    /// Context for a deep summary, at the summary budget.
    pub fn summary_context(&self, documents: &[Document], mode: ContextMode) -> AssembledContext {
        self.assemble(documents, mode, self.budget.summary_chars)
    }

    /// Context for a chat call, at the chat budget.
    pub fn chat_context(&self, documents: &[Document], mode: ContextMode) -> AssembledContext {
        self.assemble(documents, mode, self.budget.chat_chars)
    }

    /// Note-keeper chat context, at the chat budget.
    pub fn note_context(&self, note: &str) -> AssembledContext {
        AssembledContext::bounded(format!("{NOTE_CONTEXT_HEADER}{note}"), 0, self.budget.chat_chars)
    }
}
