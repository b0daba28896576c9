//! Document and DocumentCollection domain types.
//!
//! A [`Document`] is one uploaded file after extraction. A
//! [`DocumentCollection`] is the ordered working set of a session; order
//! matters because it is the concatenation order of assembled context.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier, unique per upload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Media types the extraction collaborator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Pdf,
    Docx,
    PlainText,
    Markdown,
}

impl MediaType {
    /// Parse a declared MIME type. Returns `None` for anything unsupported.
    pub fn from_mime(mime: &str) -> Option<Self> {
        // Browsers sometimes append parameters such as "; charset=utf-8".
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "application/pdf" => Some(Self::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::Docx)
            }
            "text/plain" => Some(Self::PlainText),
            "text/markdown" => Some(Self::Markdown),
            _ => None,
        }
    }

    pub fn as_mime(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::PlainText => "text/plain",
            Self::Markdown => "text/markdown",
        }
    }
}

/// One uploaded file's extracted text plus identifying metadata.
///
/// Immutable after creation: fields are private and there are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    id: DocumentId,
    display_name: String,
    media_type: MediaType,
    text: String,
}

impl Document {
    /// Create a document with a fresh identifier.
    pub fn new(display_name: impl Into<String>, media_type: MediaType, text: impl Into<String>) -> Self {
        Self::with_id(DocumentId::new(), display_name, media_type, text)
    }

    pub fn with_id(
        id: DocumentId,
        display_name: impl Into<String>,
        media_type: MediaType,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            media_type,
            text: text.into(),
        }
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The first `limit` characters of the extracted text.
    pub fn preview(&self, limit: usize) -> &str {
        match self.text.char_indices().nth(limit) {
            Some((byte_idx, _)) => &self.text[..byte_idx],
            None => &self.text,
        }
    }
}

/// Ordered set of documents with unique identifiers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentCollection {
    documents: Vec<Document>,
}

impl DocumentCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document. Fails if its identifier is already present.
    pub fn add(&mut self, document: Document) -> Result<()> {
        if self.contains(document.id()) {
            return Err(Error::DuplicateDocument(document.id().to_string()));
        }
        self.documents.push(document);
        Ok(())
    }

    /// Append several documents, stopping at the first duplicate.
    pub fn extend(&mut self, documents: impl IntoIterator<Item = Document>) -> Result<()> {
        for document in documents {
            self.add(document)?;
        }
        Ok(())
    }

    /// Remove a document by identifier, preserving the order of the rest.
    pub fn remove(&mut self, id: &DocumentId) -> Option<Document> {
        let idx = self.documents.iter().position(|d| d.id() == id)?;
        Some(self.documents.remove(idx))
    }

    pub fn get(&self, id: &DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| d.id() == id)
    }

    pub fn contains(&self, id: &DocumentId) -> bool {
        self.documents.iter().any(|d| d.id() == id)
    }

    pub fn clear(&mut self) {
        self.documents.clear();
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    pub fn as_slice(&self) -> &[Document] {
        &self.documents
    }
}

impl<'a> IntoIterator for &'a DocumentCollection {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str, text: &str) -> Document {
        Document::new(name, MediaType::PlainText, text)
    }

    #[test]
    fn mime_parsing() {
        assert_eq!(MediaType::from_mime("application/pdf"), Some(MediaType::Pdf));
        assert_eq!(
            MediaType::from_mime("text/plain; charset=utf-8"),
            Some(MediaType::PlainText)
        );
        assert_eq!(MediaType::from_mime("image/png"), None);
        assert_eq!(MediaType::from_mime(MediaType::Docx.as_mime()), Some(MediaType::Docx));
    }

    #[test]
    fn collection_preserves_insertion_order() {
        let mut docs = DocumentCollection::new();
        docs.add(doc("a.txt", "Alpha")).unwrap();
        docs.add(doc("b.txt", "Beta")).unwrap();
        docs.add(doc("c.txt", "Gamma")).unwrap();

        let names: Vec<_> = docs.iter().map(|d| d.display_name()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut docs = DocumentCollection::new();
        let id = DocumentId::from("fixed");
        docs.add(Document::with_id(id.clone(), "a.txt", MediaType::PlainText, "x"))
            .unwrap();
        let err = docs
            .add(Document::with_id(id, "b.txt", MediaType::PlainText, "y"))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateDocument(_)));
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut docs = DocumentCollection::new();
        let a = doc("a.txt", "Alpha");
        let b = doc("b.txt", "Beta");
        let c = doc("c.txt", "Gamma");
        let b_id = b.id().clone();
        docs.extend([a, b, c]).unwrap();

        let removed = docs.remove(&b_id).unwrap();
        assert_eq!(removed.display_name(), "b.txt");
        let names: Vec<_> = docs.iter().map(|d| d.display_name()).collect();
        assert_eq!(names, vec!["a.txt", "c.txt"]);
        assert!(docs.remove(&b_id).is_none());
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let d = doc("zh.txt", "繁體中文內容");
        assert_eq!(d.preview(2), "繁體");
        assert_eq!(d.preview(100), "繁體中文內容");
    }
}
