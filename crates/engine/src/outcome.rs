//! Task outcomes.
//!
//! Provider failures are rendered inline rather than raised, so every model
//! call ends in an [`Outcome`]. Blank output and failures stay distinct.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// The model produced text.
    Generated { text: String },
    /// The model answered with nothing; show the task's placeholder.
    Empty { placeholder: String },
    /// The call failed; `message` is shown verbatim.
    Failed { message: String },
}

impl Outcome {
    pub fn generated(text: impl Into<String>) -> Self {
        Self::Generated { text: text.into() }
    }

    /// What the client shows for this outcome.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Generated { text } => text,
            Self::Empty { placeholder } => placeholder,
            Self::Failed { message } => message,
        }
    }

    /// The generated text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Generated { text } => Some(text),
            _ => None,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
