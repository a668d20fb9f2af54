/*!
 * Batch enhancement processing.
 *
 * This module maps the enhancement engine over a named document collection,
 * with support for progress tracking and per-entry error reporting. Decode
 * failures inside an archive never abort the batch: the surviving documents
 * are processed and the failures are reported alongside them.
 */

use log::warn;

use crate::archive;
use crate::document::DocumentBatch;
use crate::errors::{ArchiveError, BatchError};

use super::core::{EnhancementOp, Enhancer};

/// Prefix applied to every output name so enhanced files never collide
/// with the originals they were derived from
pub const OUTPUT_PREFIX: &str = "enhanced_";

/// Outcome of processing a batch: the transformed documents plus any
/// per-entry failures collected while the batch was assembled
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Successfully transformed documents, input order preserved
    pub documents: DocumentBatch,

    /// Entries that were skipped, with the reason each one was
    pub failures: Vec<BatchError>,
}

impl BatchReport {
    /// Whether some entries were skipped while others succeeded
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty() && !self.documents.is_empty()
    }

    /// One-line summary of the skipped entries, for logging
    pub fn failure_summary(&self) -> String {
        self.failures
            .iter()
            .map(|failure| failure.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Batch processor applying one operation list to every document in a batch
pub struct BatchProcessor {
    /// The enhancement service to apply
    enhancer: Enhancer,
}

impl BatchProcessor {
    /// Create a new batch processor
    pub fn new(enhancer: Enhancer) -> Self {
        Self { enhancer }
    }

    /// Apply the operations to every document in the batch.
    ///
    /// The output batch has exactly the same name set as the input; names
    /// are never invented or dropped here. Output marking happens at
    /// packaging time via [`output_entry_name`].
    pub fn process(&self, batch: &DocumentBatch, ops: &[EnhancementOp]) -> DocumentBatch {
        self.process_with_progress(batch, ops, |_, _| {})
    }

    /// Apply the operations to every document, reporting progress.
    ///
    /// The callback receives (processed so far, total) after each document.
    pub fn process_with_progress(
        &self,
        batch: &DocumentBatch,
        ops: &[EnhancementOp],
        progress_callback: impl Fn(usize, usize),
    ) -> DocumentBatch {
        let total = batch.len();
        let mut output = DocumentBatch::new();

        for (index, document) in batch.iter().enumerate() {
            let content = self.enhancer.enhance(&document.content, ops);

            // Input names are unique, so this insert cannot collide.
            let _ = output.push(crate::document::Document::new(&document.name, content));

            progress_callback(index + 1, total);
        }

        output
    }

    /// Unpack an archive, apply the operations to every text entry, and
    /// report decode failures without aborting the batch.
    ///
    /// Invalid container bytes are fatal; everything past that point is
    /// partial-failure tolerant.
    pub fn process_archive(
        &self,
        bytes: &[u8],
        ops: &[EnhancementOp],
        allowed_extensions: &[String],
        progress_callback: impl Fn(usize, usize),
    ) -> Result<BatchReport, ArchiveError> {
        let unpacked = archive::unpack(bytes, allowed_extensions)?;

        for failure in &unpacked.failures {
            warn!("Skipping entry: {}", failure);
        }

        let documents = self.process_with_progress(&unpacked.batch, ops, progress_callback);

        Ok(BatchReport {
            documents,
            failures: unpacked.failures,
        })
    }

    /// Mark every document with the output prefix and pack the result
    /// into archive bytes
    pub fn pack_outputs(&self, documents: &DocumentBatch) -> Result<Vec<u8>, ArchiveError> {
        let mut marked = DocumentBatch::new();
        for document in documents {
            // Prefixing cannot create collisions when input names were unique.
            let _ = marked.push(crate::document::Document::new(
                output_entry_name(&document.name),
                document.content.clone(),
            ));
        }
        archive::pack(&marked)
    }

    /// Access the underlying enhancer
    pub fn enhancer(&self) -> &Enhancer {
        &self.enhancer
    }
}

/// Output name for an entry: the final path component gains the
/// `enhanced_` prefix, directories are left intact.
pub fn output_entry_name(name: &str) -> String {
    match name.rsplit_once('/') {
        Some((dir, file)) => format!("{}/{}{}", dir, OUTPUT_PREFIX, file),
        None => format!("{}{}", OUTPUT_PREFIX, name),
    }
}
