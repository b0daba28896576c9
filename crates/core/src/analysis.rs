//! Analysis configuration: which model answers and in which language.
//!
//! The configuration is a plain value. Callers hand it to every prompt
//! build, so there is no ambient global to go stale between calls.

use serde::{Deserialize, Serialize};

/// Model used when the configured identifier is blank.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// A model the client may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub tier: &'static str,
}

/// The fixed list of selectable models.
pub const SUPPORTED_MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "gemini-3-flash-preview",
        name: "Gemini 3 Flash (Fast)",
        tier: "flash",
    },
    ModelInfo {
        id: "gemini-3-pro-preview",
        name: "Gemini 3 Pro (Reasoning)",
        tier: "pro",
    },
    ModelInfo {
        id: "gemini-2.5-flash-image",
        name: "Gemini 2.5 Flash (Multimodal)",
        tier: "legacy",
    },
];

/// Returns true if `id` is one of [`SUPPORTED_MODELS`].
pub fn is_supported_model(id: &str) -> bool {
    SUPPORTED_MODELS.iter().any(|m| m.id == id)
}

/// Output language for every generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh-TW")]
    TraditionalChinese,
}

impl Language {
    /// The single instruction line that tells the model which language to use.
    ///
    /// Neither directive is a substring of the other, so a payload can be
    /// checked for exactly one of them.
    pub fn directive(self) -> &'static str {
        match self {
            Self::English => "OUTPUT LANGUAGE: English.",
            Self::TraditionalChinese => "OUTPUT LANGUAGE: Traditional Chinese (繁體中文).",
        }
    }

    /// Both directive strings, for exclusivity checks.
    pub fn all_directives() -> [&'static str; 2] {
        [
            Self::English.directive(),
            Self::TraditionalChinese.directive(),
        ]
    }

    /// Locale code used in config files and env overrides.
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::TraditionalChinese => "zh-TW",
        }
    }

    /// Parse a locale code. Accepts a few common spellings.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "english" => Some(Self::English),
            "zh-tw" | "zh_tw" | "zh-hant" | "traditional-chinese" => {
                Some(Self::TraditionalChinese)
            }
            _ => None,
        }
    }

    /// The other language.
    pub fn toggle(self) -> Self {
        match self {
            Self::English => Self::TraditionalChinese,
            Self::TraditionalChinese => Self::English,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Which model to call and which language to answer in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub model: String,
    pub language: Language,
}

impl AnalysisConfig {
    pub fn new(model: impl Into<String>, language: Language) -> Self {
        Self {
            model: model.into(),
            language,
        }
    }

    /// The model id to send, falling back to [`DEFAULT_MODEL`] when blank.
    pub fn resolved_model(&self) -> &str {
        let trimmed = self.model.trim();
        if trimmed.is_empty() {
            DEFAULT_MODEL
        } else {
            trimmed
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL, Language::English)
    }
}
