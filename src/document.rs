use std::fmt;
use crate::errors::BatchError;

// @module: Named text documents and batches of them

/// Placeholder name for direct text entry, where no filename exists
pub const DIRECT_INPUT_NAME: &str = "input.txt";

// @struct: Single named text document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    // @field: Entry name, unique within a batch
    pub name: String,

    // @field: Decoded UTF-8 content
    pub content: String,
}

impl Document {
    /// Create a new document
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Document {
            name: name.into(),
            content: content.into(),
        }
    }

    // @creates: Document from raw bytes
    // @validates: UTF-8 decoding; failure is a per-entry batch error
    pub fn from_bytes(name: &str, bytes: Vec<u8>) -> Result<Self, BatchError> {
        let content = String::from_utf8(bytes).map_err(|_| BatchError::Decode {
            name: name.to_string(),
        })?;

        Ok(Document {
            name: name.to_string(),
            content,
        })
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.name, self.content.len())
    }
}

/// Ordered collection of documents with unique names.
///
/// Constructed either from a single direct-input document or by unpacking
/// an archive; discarded once the output has been emitted.
#[derive(Debug, Clone, Default)]
pub struct DocumentBatch {
    /// Documents in insertion order
    entries: Vec<Document>,
}

impl DocumentBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        DocumentBatch { entries: Vec::new() }
    }

    /// Create a batch holding a single document
    pub fn singleton(name: impl Into<String>, content: impl Into<String>) -> Self {
        DocumentBatch {
            entries: vec![Document::new(name, content)],
        }
    }

    /// Add a document, rejecting duplicate names
    pub fn push(&mut self, document: Document) -> Result<(), BatchError> {
        if self.contains(&document.name) {
            return Err(BatchError::DuplicateName(document.name));
        }
        self.entries.push(document);
        Ok(())
    }

    /// Look up a document by name
    pub fn get(&self, name: &str) -> Option<&Document> {
        self.entries.iter().find(|doc| doc.name == name)
    }

    /// Whether a document with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|doc| doc.name == name)
    }

    /// Entry names in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|doc| doc.name.as_str()).collect()
    }

    /// Iterate over documents in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.entries.iter()
    }

    /// Number of documents in the batch
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the batch is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for DocumentBatch {
    type Item = Document;
    type IntoIter = std::vec::IntoIter<Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a DocumentBatch {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
