use std::path::Path;

use serde::Serialize;

use crate::classifier::{describe_image, describe_ole_object};
use crate::combiner::combine_content;
use crate::container::{EntryClassification, scan_container, summarize_entries};
use crate::docx_extractor::{extract_document_text, extract_xml_text};

/// Auxiliary fragments at or below this many characters are noise
/// (stray style or settings text) and are dropped
const AUXILIARY_FRAGMENT_FLOOR: usize = 10;

/// Extraction statistics for one parsed document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseMetadata {
    pub ole_objects_count: usize,
    pub images_count: usize,
    pub math_formulas_count: usize,
    pub content_length: usize,
}

/// Result of parsing one document
///
/// `content` is present only on success; a failed parse carries an error
/// message and no partial content.
#[derive(Debug, Clone, Serialize)]
pub struct ParseResult {
    pub success: bool,
    pub content: String,
    pub error: Option<String>,
    pub metadata: ParseMetadata,
}

impl ParseResult {
    /// Create a new result for successful parsing
    pub fn success(content: String, metadata: ParseMetadata) -> Self {
        Self {
            success: true,
            content,
            error: None,
            metadata,
        }
    }

    /// Create a new result for error cases
    pub fn error(error: String) -> Self {
        Self {
            success: false,
            content: String::new(),
            error: Some(error),
            metadata: ParseMetadata::default(),
        }
    }
}

/// Parse a DOCX package supplied as raw bytes
///
/// `filename` is a naming contract only: anything without a `.docx`
/// extension is rejected before the container is opened. The single hard
/// failure after that is an unreadable container; every sub-extraction
/// failure degrades to a placeholder note and the parse still succeeds.
pub fn parse_docx_bytes(data: &[u8], filename: &str) -> ParseResult {
    log::info!("Parsing document: {}", filename);

    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());
    if extension.as_deref() != Some("docx") {
        return ParseResult::error(format!(
            "Only .docx files are supported, got: {}",
            filename
        ));
    }

    let entries = match scan_container(data) {
        Ok(entries) => entries,
        Err(e) => return ParseResult::error(format!("{:#}", e)),
    };

    let summary = summarize_entries(&entries);
    log::info!(
        "Container opened: {} entries ({} embedded objects, {} images, {} auxiliary parts)",
        summary.total_entries,
        summary.embedded_math + summary.ole_objects,
        summary.images,
        summary.auxiliary_xml
    );

    let mut body_text = String::new();
    let mut math_formulas = 0usize;
    let mut ole_parts: Vec<String> = Vec::new();
    let mut image_parts: Vec<String> = Vec::new();
    let mut aux_parts: Vec<String> = Vec::new();
    let mut ole_count = 0usize;
    let mut image_count = 0usize;

    for entry in &entries {
        match entry.classification {
            EntryClassification::DocumentBody => match &entry.data {
                Some(xml) => {
                    let extracted = extract_document_text(xml);
                    body_text = extracted.text;
                    math_formulas += extracted.math_formulas;
                }
                None => log::warn!("Document body entry could not be read"),
            },
            EntryClassification::EmbeddedMath | EntryClassification::OleObject => {
                ole_count += 1;
                ole_parts.push(describe_ole_object(entry));
            }
            EntryClassification::Image => {
                image_count += 1;
                image_parts.push(describe_image(entry));
            }
            EntryClassification::AuxiliaryXml => match &entry.data {
                Some(xml) => {
                    let (text, math) = extract_xml_text(xml);
                    math_formulas += math;
                    if text.chars().count() > AUXILIARY_FRAGMENT_FLOOR {
                        aux_parts.push(format!("[{}]: {}", entry.path, text));
                    }
                }
                None => aux_parts.push(format!("[{} - could not be read]", entry.path)),
            },
            EntryClassification::Other => {}
        }
    }

    if summary.document_body == 0 {
        log::warn!("No document body entry found in {}", filename);
    }

    let content = combine_content(
        &body_text,
        &ole_parts.join("\n"),
        &image_parts.join("\n"),
        &aux_parts.join("\n"),
    );

    let metadata = ParseMetadata {
        ole_objects_count: ole_count,
        images_count: image_count,
        math_formulas_count: math_formulas,
        content_length: content.chars().count(),
    };

    log::info!(
        "Parsing finished: {} chars, {} OLE objects, {} images, {} math formulas",
        metadata.content_length,
        metadata.ole_objects_count,
        metadata.images_count,
        metadata.math_formulas_count
    );

    ParseResult::success(content, metadata)
}

/// Parse a DOCX file from disk
pub fn parse_docx_file(file_path: &str) -> ParseResult {
    if !Path::new(file_path).exists() {
        return ParseResult::error(format!("File not found: {}", file_path));
    }

    let filename = Path::new(file_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.to_string());

    match std::fs::read(file_path) {
        Ok(data) => parse_docx_bytes(&data, &filename),
        Err(e) => ParseResult::error(format!("Failed to read file {}: {}", file_path, e)),
    }
}
