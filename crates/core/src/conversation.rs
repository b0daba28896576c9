//! Conversation turn and log domain types.
//!
//! A [`ConversationLog`] is the chat history of one session: user asks,
//! assistant answers, in chronological order. The log is append-only; the
//! only destructive operation is [`ConversationLog::clear`], used when the
//! content the chat is about gets discarded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The language model
    Assistant,
}

/// A single message in a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    role: Role,
    content: String,
    created_at: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// How many turns a log retains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityPolicy {
    /// Keep everything. Every turn is resent to the model on each chat call.
    #[default]
    Unbounded,
    /// Keep at most this many turns, evicting the oldest first.
    MaxTurns(usize),
}

impl CapacityPolicy {
    /// Build from a config value where `0` means unbounded.
    pub fn from_max_turns(max_turns: usize) -> Self {
        if max_turns == 0 {
            Self::Unbounded
        } else {
            Self::MaxTurns(max_turns)
        }
    }

    /// `MaxTurns(0)` would empty the log on every append; treat it as
    /// unbounded.
    pub fn normalized(self) -> Self {
        match self {
            Self::MaxTurns(0) => Self::Unbounded,
            other => other,
        }
    }
}

/// Idle until the first append; Active until cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    Idle,
    Active,
}

/// Ordered, append-only sequence of turns.
///
/// Consecutive turns with the same role are accepted; alternation is
/// something callers normally produce, not something the log enforces.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationLog {
    turns: Vec<ConversationTurn>,
    #[serde(default)]
    policy: CapacityPolicy,
}

impl ConversationLog {
    /// Create an empty, unbounded log.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: CapacityPolicy) -> Self {
        Self {
            turns: Vec::new(),
            policy: policy.normalized(),
        }
    }

    pub fn policy(&self) -> CapacityPolicy {
        self.policy.normalized()
    }

    /// Append a turn stamped with the current time.
    ///
    /// Timestamps never go backwards within a log, even if the wall clock
    /// does.
    pub fn append_turn(&mut self, role: Role, content: impl Into<String>) {
        let now = Utc::now();
        let created_at = match self.turns.last() {
            Some(last) if last.created_at > now => last.created_at,
            _ => now,
        };
        self.turns.push(ConversationTurn {
            role,
            content: content.into(),
            created_at,
        });
        self.enforce_capacity();
    }

    /// The turns in chronological order.
    pub fn history(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Drop every turn. The log returns to [`ConversationState::Idle`].
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn state(&self) -> ConversationState {
        if self.turns.is_empty() {
            ConversationState::Idle
        } else {
            ConversationState::Active
        }
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    fn enforce_capacity(&mut self) {
        if let CapacityPolicy::MaxTurns(max) = self.policy.normalized() {
            if self.turns.len() > max {
                let excess = self.turns.len() - max;
                self.turns.drain(..excess);
                tracing::debug!(evicted = excess, max_turns = max, "Evicted oldest conversation turns");
            }
        }
    }
}
