//! Text extraction collaborator.
//!
//! Turns an uploaded file into plain text. The engine only consumes this
//! trait; parsing lives in `auditflow-extract`.

use crate::document::MediaType;
use crate::error::ExtractionError;
use async_trait::async_trait;

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// File name shown to the user
    pub name: String,
    /// Declared MIME type, as sent by the client
    pub media_type: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Resolve the declared MIME type, failing with `UnsupportedType`.
    pub fn resolve_media_type(&self) -> Result<MediaType, ExtractionError> {
        MediaType::from_mime(&self.media_type).ok_or_else(|| ExtractionError::UnsupportedType {
            media_type: self.media_type.clone(),
        })
    }
}

/// Extracts plain text from a file.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract the text of `file`. Unsupported media types fail before any
    /// parse attempt.
    async fn extract(&self, file: &FileUpload) -> Result<String, ExtractionError>;
}
