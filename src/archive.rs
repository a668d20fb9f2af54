/*!
 * In-memory archive handling.
 *
 * Archives are decoded and encoded entirely from byte buffers: zip bytes in,
 * named entries out, and back. No temporary extraction directory exists, so
 * there is no cleanup path to get wrong.
 */

use std::io::{Cursor, Read, Write};
use log::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::document::{Document, DocumentBatch};
use crate::errors::{ArchiveError, BatchError};

/// Result of unpacking an archive: the decodable text entries plus the
/// per-entry failures encountered along the way
#[derive(Debug, Default)]
pub struct UnpackOutcome {
    /// Documents that were decoded successfully, in archive order
    pub batch: DocumentBatch,

    /// Entries that were skipped and why
    pub failures: Vec<BatchError>,
}

/// Unpack zip bytes into named text documents.
///
/// Entries whose extension is not in the allow-list are filtered out
/// silently; entries that fail UTF-8 decoding are recorded as failures and
/// skipped. Only an invalid container aborts the whole call.
pub fn unpack(bytes: &[u8], allowed_extensions: &[String]) -> Result<UnpackOutcome, ArchiveError> {
    let cursor = Cursor::new(bytes);
    let mut archive =
        ZipArchive::new(cursor).map_err(|e| ArchiveError::InvalidFormat(e.to_string()))?;

    let mut outcome = UnpackOutcome::default();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| ArchiveError::EntryRead {
            index,
            message: e.to_string(),
        })?;

        if !entry.is_file() {
            continue;
        }

        let name = entry.name().to_string();
        if !has_allowed_extension(&name, allowed_extensions) {
            debug!("Filtered non-text entry '{}'", name);
            continue;
        }

        let mut content = Vec::new();
        entry
            .read_to_end(&mut content)
            .map_err(|e| ArchiveError::EntryRead {
                index,
                message: e.to_string(),
            })?;

        match Document::from_bytes(&name, content) {
            Ok(document) => {
                if let Err(duplicate) = outcome.batch.push(document) {
                    outcome.failures.push(duplicate);
                }
            },
            Err(decode) => {
                outcome.failures.push(decode);
            }
        }
    }

    Ok(outcome)
}

/// Pack named documents into zip bytes, one entry per document
pub fn pack(batch: &DocumentBatch) -> Result<Vec<u8>, ArchiveError> {
    let mut buffer = Vec::new();
    {
        let cursor = Cursor::new(&mut buffer);
        let mut zip = ZipWriter::new(cursor);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for document in batch {
            zip.start_file(document.name.as_str(), options)
                .map_err(|e| ArchiveError::Write(e.to_string()))?;
            zip.write_all(document.content.as_bytes())
                .map_err(|e| ArchiveError::Write(e.to_string()))?;
        }

        zip.finish().map_err(|e| ArchiveError::Write(e.to_string()))?;
    }

    Ok(buffer)
}

/// Check an entry name against the extension allow-list, case-insensitively
fn has_allowed_extension(name: &str, allowed_extensions: &[String]) -> bool {
    let lowered = name.to_lowercase();
    allowed_extensions.iter().any(|ext| {
        let normalized = if ext.starts_with('.') {
            ext.to_lowercase()
        } else {
            format!(".{}", ext.to_lowercase())
        };
        lowered.ends_with(&normalized)
    })
}
