/// DOCX Math Parser - extraction engine for Word documents with mathematical content
/// Recovers text/tables, math markup (as LaTeX notation) and embedded object info

pub mod symbol_table;
pub mod math_markup;
pub mod container;
pub mod docx_extractor;
pub mod classifier;
pub mod combiner;
pub mod document_parser;

/// Re-export the engine boundary
pub use document_parser::{ParseMetadata, ParseResult, parse_docx_bytes, parse_docx_file};

/// Re-export container scanning
pub use container::{
    ContainerEntry,
    ContainerSummary,
    EntryClassification,
    classify_entry_path,
    scan_container,
    summarize_entries,
};

/// Re-export math markup conversion
pub use math_markup::{MarkupElement, convert_markup};

/// Re-export symbol table lookups
pub use symbol_table::{convert_math_symbols, lookup, substitute_symbols};

/// Re-export text extraction
pub use docx_extractor::{ExtractedBody, extract_document_text, extract_xml_text};

/// Re-export heuristic content descriptions
pub use classifier::{describe_image, describe_ole_object};

/// Re-export content combining
pub use combiner::{AUXILIARY_TEXT_CAP, combine_content};
