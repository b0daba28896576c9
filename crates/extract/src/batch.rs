//! Concurrent batch extraction with per-file failure isolation.

use auditflow_core::document::Document;
use auditflow_core::error::ExtractionError;
use auditflow_core::extract::{FileUpload, TextExtractor};
use futures::future::join_all;
use tracing::{info, warn};

/// One file that could not be extracted.
#[derive(Debug, Clone)]
pub struct ExtractionFailure {
    pub file_name: String,
    pub error: ExtractionError,
}

/// The result of extracting a batch of uploads.
///
/// Both lists keep the relative order of the input files.
#[derive(Debug, Default)]
pub struct BatchExtraction {
    pub documents: Vec<Document>,
    pub failures: Vec<ExtractionFailure>,
}

impl BatchExtraction {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Extract every file concurrently. A failing file never affects the others.
pub async fn extract_batch(extractor: &dyn TextExtractor, files: &[FileUpload]) -> BatchExtraction {
    let results = join_all(files.iter().map(|file| async move {
        let outcome = match file.resolve_media_type() {
            Ok(media_type) => extractor
                .extract(file)
                .await
                .map(|text| Document::new(&file.name, media_type, text)),
            Err(e) => Err(e),
        };
        (file, outcome)
    }))
    .await;

    let mut batch = BatchExtraction::default();
    for (file, outcome) in results {
        match outcome {
            Ok(document) => batch.documents.push(document),
            Err(error) => {
                warn!(file = %file.name, error = %error, "Skipping file that failed extraction");
                batch.failures.push(ExtractionFailure {
                    file_name: file.name.clone(),
                    error,
                });
            }
        }
    }

    info!(
        extracted = batch.documents.len(),
        failed = batch.failures.len(),
        "Batch extraction finished"
    );
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FileExtractor;

    #[tokio::test]
    async fn failure_in_the_middle_is_isolated() {
        let files = vec![
            FileUpload::new("a.txt", "text/plain", b"Alpha".to_vec()),
            FileUpload::new("diagram.png", "image/png", vec![0u8; 8]),
            FileUpload::new("c.md", "text/markdown", b"# Gamma".to_vec()),
        ];

        let batch = extract_batch(&FileExtractor::new(), &files).await;

        assert_eq!(batch.documents.len(), 2);
        assert_eq!(batch.documents[0].display_name(), "a.txt");
        assert_eq!(batch.documents[0].text(), "Alpha");
        assert_eq!(batch.documents[1].display_name(), "c.md");
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].file_name, "diagram.png");
        assert!(matches!(
            batch.failures[0].error,
            ExtractionError::UnsupportedType { .. }
        ));
        assert!(!batch.is_complete());
    }

    #[tokio::test]
    async fn empty_batch_is_complete() {
        let batch = extract_batch(&FileExtractor::new(), &[]).await;
        assert!(batch.documents.is_empty());
        assert!(batch.is_complete());
    }

    #[tokio::test]
    async fn documents_get_distinct_ids() {
        let files = vec![
            FileUpload::new("same.txt", "text/plain", b"one".to_vec()),
            FileUpload::new("same.txt", "text/plain", b"two".to_vec()),
        ];
        let batch = extract_batch(&FileExtractor::new(), &files).await;
        assert_ne!(batch.documents[0].id(), batch.documents[1].id());
    }
}
