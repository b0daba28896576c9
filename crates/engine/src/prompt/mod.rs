//! Prompt construction.
//!
//! The [`PromptBuilder`] turns task inputs into the exact payload sent to the
//! provider. It never calls the provider itself.

pub mod builder;
pub(crate) mod templates;

pub use builder::{ChatPayload, PromptBuilder, TextPayload};

use auditflow_core::error::ProviderError;
use serde::{Deserialize, Serialize};

/// The five things the engine asks the model to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    DeepSummary,
    Chat,
    SmartReplace,
    NoteTransform,
    NoteMagic,
}

impl TaskKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DeepSummary => "deep_summary",
            Self::Chat => "chat",
            Self::SmartReplace => "smart_replace",
            Self::NoteTransform => "note_transform",
            Self::NoteMagic => "note_magic",
        }
    }

    /// Shown in place of a blank model answer.
    pub fn empty_placeholder(self) -> &'static str {
        match self {
            Self::DeepSummary => "No summary generated.",
            Self::Chat => "I could not generate a response.",
            Self::SmartReplace => "Failed to process smart replace.",
            Self::NoteTransform => "Failed to transform note.",
            Self::NoteMagic => "Magic failed.",
        }
    }

    /// Inline text for a provider failure.
    pub fn failure_message(self, error: &ProviderError) -> String {
        match self {
            Self::DeepSummary => format!("Error generating summary: {error}"),
            _ => error.to_string(),
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predefined note edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MagicKind {
    Format,
    Grammar,
    Action,
    Summary,
    Expand,
    /// Fallback for anything unrecognized.
    Improve,
}

impl MagicKind {
    /// Parse a magic kind. Unknown values degrade to [`MagicKind::Improve`].
    pub fn parse(kind: &str) -> Self {
        match kind.trim().to_ascii_lowercase().as_str() {
            "format" => Self::Format,
            "grammar" => Self::Grammar,
            "action" => Self::Action,
            "summary" => Self::Summary,
            "expand" => Self::Expand,
            _ => Self::Improve,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Grammar => "grammar",
            Self::Action => "action",
            Self::Summary => "summary",
            Self::Expand => "expand",
            Self::Improve => "improve",
        }
    }

    /// The editing instruction sent to the model.
    pub fn instruction(self) -> &'static str {
        match self {
            Self::Format => {
                "Reformat this note to be cleaner, using better markdown structure (tables, lists, headers)."
            }
            Self::Grammar => {
                "Fix all grammar, spelling, and punctuation errors. Elevate the tone to professional business class."
            }
            Self::Action => {
                "Extract a checklist of 'Action Items' or 'To-Dos' from this note. Append them to the bottom."
            }
            Self::Summary => "Add a 'TL;DR' Executive Summary section at the very top of the note.",
            Self::Expand => {
                "Expand on the key bullet points with more detail and context where applicable."
            }
            Self::Improve => "Improve this note.",
        }
    }
}

impl From<&str> for MagicKind {
    fn from(kind: &str) -> Self {
        Self::parse(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_kinds_parse() {
        assert_eq!(MagicKind::parse("format"), MagicKind::Format);
        assert_eq!(MagicKind::parse("Grammar"), MagicKind::Grammar);
        assert_eq!(MagicKind::parse(" action "), MagicKind::Action);
        assert_eq!(MagicKind::parse("summary"), MagicKind::Summary);
        assert_eq!(MagicKind::parse("expand"), MagicKind::Expand);
    }

    #[test]
    fn unknown_magic_kind_degrades_to_improve() {
        let kind = MagicKind::parse("unknown-value");
        assert_eq!(kind, MagicKind::Improve);
        assert_eq!(kind.instruction(), "Improve this note.");
        assert_eq!(MagicKind::from(""), MagicKind::Improve);
    }

    #[test]
    fn placeholders_are_distinct_per_task() {
        let kinds = [
            TaskKind::DeepSummary,
            TaskKind::Chat,
            TaskKind::SmartReplace,
            TaskKind::NoteTransform,
            TaskKind::NoteMagic,
        ];
        let mut seen = std::collections::HashSet::new();
        for kind in kinds {
            assert!(seen.insert(kind.empty_placeholder()));
        }
    }

    #[test]
    fn summary_failures_are_prefixed() {
        let err = ProviderError::Network("connection reset".into());
        assert_eq!(
            TaskKind::DeepSummary.failure_message(&err),
            "Error generating summary: Network error: connection reset"
        );
        assert_eq!(TaskKind::Chat.failure_message(&err), "Network error: connection reset");
    }
}
