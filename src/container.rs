use std::io::{Cursor, Read};

use anyhow::{Context, Result};
use zip::ZipArchive;

/// Extensions recognized as embedded images under the media directory
const IMAGE_EXTENSIONS: [&str; 7] = [".png", ".jpg", ".jpeg", ".gif", ".bmp", ".emf", ".wmf"];

/// Canonical path of the main document part
const DOCUMENT_BODY_PATH: &str = "word/document.xml";

/// Content class of one container entry, derived from its path at scan time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryClassification {
    /// The main document XML part
    DocumentBody,
    /// Embedded equation objects under word/embeddings/
    EmbeddedMath,
    /// Any other embedded OLE object
    OleObject,
    /// Image under the media directory
    Image,
    /// Document-namespace XML part other than the main document
    AuxiliaryXml,
    Other,
}

/// One named byte stream read out of the DOCX container
///
/// `data` is `None` when the entry existed in the archive but its bytes
/// could not be read; classification is still valid in that case.
#[derive(Debug, Clone)]
pub struct ContainerEntry {
    pub path: String,
    pub data: Option<Vec<u8>>,
    pub classification: EntryClassification,
}

/// Per-class entry counts for one scanned container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerSummary {
    pub total_entries: usize,
    pub document_body: usize,
    pub embedded_math: usize,
    pub ole_objects: usize,
    pub images: usize,
    pub auxiliary_xml: usize,
    pub other: usize,
}

/// Classify an entry by its path
///
/// Rules are checked in priority order: embeddings paths win over media
/// paths, which win over the document parts.
pub fn classify_entry_path(path: &str) -> EntryClassification {
    if path.contains("embeddings") {
        if path.starts_with("word/embeddings/") {
            return EntryClassification::EmbeddedMath;
        }
        return EntryClassification::OleObject;
    }

    let lower = path.to_ascii_lowercase();
    if path.starts_with("word/media/") && IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return EntryClassification::Image;
    }

    if path == DOCUMENT_BODY_PATH {
        return EntryClassification::DocumentBody;
    }

    if path.starts_with("word/") && path.ends_with(".xml") && !path.contains("document") {
        return EntryClassification::AuxiliaryXml;
    }

    EntryClassification::Other
}

/// Open a DOCX package and read out its classified entries
///
/// The only hard failure is a byte stream that is not a readable ZIP
/// archive. A single corrupt entry never aborts the scan: its bytes are
/// recorded as unreadable and scanning continues.
pub fn scan_container(data: &[u8]) -> Result<Vec<ContainerEntry>> {
    let mut archive = ZipArchive::new(Cursor::new(data))
        .with_context(|| "Failed to read DOCX file as ZIP archive")?;

    let mut entries = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        match archive.by_index(index) {
            Ok(mut file) => {
                if file.is_dir() {
                    continue;
                }
                let path = file.name().to_string();
                let classification = classify_entry_path(&path);

                let mut bytes = Vec::new();
                let data = match file.read_to_end(&mut bytes) {
                    Ok(_) => Some(bytes),
                    Err(e) => {
                        log::warn!("Failed to read container entry {}: {}", path, e);
                        None
                    }
                };

                entries.push(ContainerEntry {
                    path,
                    data,
                    classification,
                });
            }
            Err(e) => {
                log::warn!("Failed to access container entry {}: {}", index, e);
            }
        }
    }

    Ok(entries)
}

/// Count scanned entries per classification
pub fn summarize_entries(entries: &[ContainerEntry]) -> ContainerSummary {
    let mut summary = ContainerSummary {
        total_entries: entries.len(),
        ..ContainerSummary::default()
    };

    for entry in entries {
        match entry.classification {
            EntryClassification::DocumentBody => summary.document_body += 1,
            EntryClassification::EmbeddedMath => summary.embedded_math += 1,
            EntryClassification::OleObject => summary.ole_objects += 1,
            EntryClassification::Image => summary.images += 1,
            EntryClassification::AuxiliaryXml => summary.auxiliary_xml += 1,
            EntryClassification::Other => summary.other += 1,
        }
    }

    summary
}
