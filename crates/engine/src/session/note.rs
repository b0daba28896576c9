//! The note keeper: raw notes in, organized Markdown out, plus chat about
//! the note.

use super::chat_round;
use crate::analyst::Analyst;
use crate::outcome::Outcome;
use crate::prompt::{MagicKind, TaskKind};
use auditflow_core::conversation::{CapacityPolicy, ConversationLog};
use auditflow_core::error::Result;

#[derive(Debug, Clone, Default)]
pub struct NoteSession {
    raw: String,
    organized: Option<String>,
    log: ConversationLog,
}

impl NoteSession {
    pub fn new(policy: CapacityPolicy) -> Self {
        Self {
            raw: String::new(),
            organized: None,
            log: ConversationLog::with_policy(policy),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn set_raw(&mut self, raw: impl Into<String>) {
        self.raw = raw.into();
    }

    pub fn organized(&self) -> Option<&str> {
        self.organized.as_deref()
    }

    /// Manual edit of the organized note.
    pub fn set_organized(&mut self, note: impl Into<String>) {
        self.organized = Some(note.into());
    }

    /// The organized note if it is non-empty, else the raw input.
    pub fn current_note(&self) -> &str {
        self.organized
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.raw)
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Organize the raw input. Only generated text replaces the note.
    pub async fn transform(&mut self, analyst: &Analyst) -> Result<Option<Outcome>> {
        analyst.ensure_credentials()?;
        if self.raw.trim().is_empty() {
            return Ok(None);
        }

        let payload = analyst.builder().note_transform(&self.raw, analyst.config());
        let outcome = analyst.generate(TaskKind::NoteTransform, payload).await;
        if let Some(text) = outcome.text() {
            self.organized = Some(text.to_string());
        }
        Ok(Some(outcome))
    }

    /// Apply a predefined edit to the organized note.
    pub async fn magic(&mut self, analyst: &Analyst, kind: MagicKind) -> Result<Option<Outcome>> {
        analyst.ensure_credentials()?;
        let Some(note) = self.organized.as_deref().filter(|n| !n.is_empty()) else {
            return Ok(None);
        };

        let payload = analyst.builder().note_magic(note, kind, analyst.config());
        let outcome = analyst.generate(TaskKind::NoteMagic, payload).await;
        if let Some(text) = outcome.text() {
            self.organized = Some(text.to_string());
        }
        Ok(Some(outcome))
    }

    /// Ask a question about the current note.
    pub async fn chat(&mut self, analyst: &Analyst, query: &str) -> Result<Option<Outcome>> {
        analyst.ensure_credentials()?;
        if query.trim().is_empty() {
            return Ok(None);
        }

        let context = analyst.assembler().note_context(self.current_note());
        Ok(Some(chat_round(analyst, &mut self.log, &context, query).await))
    }

    /// Start over: clears the note and its chat.
    pub fn discard(&mut self) {
        self.raw.clear();
        self.organized = None;
        self.log.clear();
    }
}
