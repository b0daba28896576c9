//! # AuditFlow Extract
//!
//! The concrete [`TextExtractor`](auditflow_core::TextExtractor) used by the
//! engine. Dispatches on the declared media type:
//!
//! | Media type | Strategy |
//! |---|---|
//! | `application/pdf` | `pdf-extract`, one `--- Page N ---` block per page |
//! | DOCX | `zip` + `quick-xml` over `word/document.xml` |
//! | `text/plain`, `text/markdown` | UTF-8 decode (lossy) |
//!
//! Batch uploads go through [`extract_batch`], which isolates failures per file.

pub mod batch;
pub mod docx;
pub mod pdf;

pub use batch::{BatchExtraction, ExtractionFailure, extract_batch};

use async_trait::async_trait;
use auditflow_core::document::MediaType;
use auditflow_core::error::ExtractionError;
use auditflow_core::extract::{FileUpload, TextExtractor};
use tracing::debug;

/// Media-type dispatching extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileExtractor;

impl FileExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for FileExtractor {
    async fn extract(&self, file: &FileUpload) -> Result<String, ExtractionError> {
        let media_type = file.resolve_media_type()?;

        debug!(
            file = %file.name,
            media_type = media_type.as_mime(),
            bytes = file.bytes.len(),
            "Extracting text"
        );

        match media_type {
            MediaType::PlainText | MediaType::Markdown => {
                Ok(String::from_utf8_lossy(&file.bytes).into_owned())
            }
            // Binary formats are CPU-bound; keep them off the async workers.
            MediaType::Pdf => run_blocking(file, pdf::extract_text).await,
            MediaType::Docx => run_blocking(file, docx::extract_text).await,
        }
    }
}

async fn run_blocking(
    file: &FileUpload,
    parse: fn(&[u8]) -> Result<String, String>,
) -> Result<String, ExtractionError> {
    let bytes = file.bytes.clone();
    let parse_failure = |reason: String| ExtractionError::ParseFailure {
        file_name: file.name.clone(),
        reason,
    };

    tokio::task::spawn_blocking(move || parse(&bytes))
        .await
        .map_err(|e| parse_failure(format!("extraction task failed: {e}")))?
        .map_err(parse_failure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn plain_text_passes_through() {
        let file = FileUpload::new("a.txt", "text/plain", b"Alpha".to_vec());
        assert_eq!(FileExtractor::new().extract(&file).await.unwrap(), "Alpha");
    }

    #[tokio::test]
    async fn invalid_utf8_is_decoded_lossily() {
        let file = FileUpload::new("b.md", "text/markdown", vec![b'o', b'k', 0xff]);
        let text = FileExtractor::new().extract(&file).await.unwrap();
        assert!(text.starts_with("ok"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[tokio::test]
    async fn unsupported_type_fails_before_parsing() {
        let file = FileUpload::new("img.png", "image/png", vec![0x89, b'P', b'N', b'G']);
        let err = FileExtractor::new().extract(&file).await.unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedType { ref media_type } if media_type == "image/png"));
    }

    #[tokio::test]
    async fn corrupt_pdf_is_a_parse_failure() {
        let file = FileUpload::new("broken.pdf", "application/pdf", b"not a pdf".to_vec());
        let err = FileExtractor::new().extract(&file).await.unwrap_err();
        assert!(matches!(err, ExtractionError::ParseFailure { ref file_name, .. } if file_name == "broken.pdf"));
    }

    #[tokio::test]
    async fn docx_goes_through_the_docx_parser() {
        let bytes = docx::tests::build_docx(
            r#"<w:document><w:body><w:p><w:r><w:t>Findings</w:t></w:r></w:p></w:body></w:document>"#,
        );
        let file = FileUpload::new("r.docx", MediaType::Docx.as_mime(), bytes);
        let text = FileExtractor::new().extract(&file).await.unwrap();
        assert_eq!(text.trim(), "Findings");
    }
}
