//! Error types for the AuditFlow domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum. Display strings are shown
//! to the end user verbatim, so keep them readable.

use thiserror::Error;

/// The top-level error type for AuditFlow operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Credentials ---
    #[error("API key required: configure an API key before running analysis")]
    CredentialMissing,

    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Extraction errors ---
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    // --- Document collection ---
    #[error("Document already present in collection: {0}")]
    DuplicateDocument(String),

    // --- Configuration errors ---
    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {media_type}")]
    UnsupportedType { media_type: String },

    #[error("Failed to parse {file_name}: {reason}")]
    ParseFailure { file_name: String, reason: String },
}
