use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::math_markup::{MarkupElement, convert_markup};
use crate::symbol_table::convert_math_symbols;

/// Stand-in inserted into paragraph text where an inline formula sits,
/// replaced by the converted notation once the paragraph is complete
const MATH_PLACEHOLDER: char = '\u{FFFC}';

const CELL_DELIMITER: &str = " | ";

/// Body text extracted from the main document part
#[derive(Debug, Clone, Default)]
pub struct ExtractedBody {
    pub text: String,
    /// Number of math formulas converted to notation
    pub math_formulas: usize,
}

/// Extract paragraph and table text from the main document XML
///
/// Walks the document in order: paragraph run text is concatenated and
/// normalized through the symbol table, whitespace-only paragraphs are
/// dropped, tables become one line per row with cells joined by `" | "`,
/// and inline math subtrees are converted to notation and spliced in
/// place. XML errors are logged and extraction returns whatever was
/// gathered up to that point.
pub fn extract_document_text(xml: &[u8]) -> ExtractedBody {
    let mut reader = Reader::from_reader(xml);

    let mut parts: Vec<String> = Vec::new();
    let mut math_count = 0usize;

    let mut para_text = String::new();
    let mut para_formulas: Vec<String> = Vec::new();
    let mut in_text = false;

    let mut table_depth = 0usize;
    let mut table_lines: Vec<String> = Vec::new();
    let mut row_cells: Vec<String> = Vec::new();
    let mut cell_text = String::new();

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"tbl" => table_depth += 1,
                b"tr" if table_depth == 1 => row_cells.clear(),
                b"tc" if table_depth == 1 => cell_text.clear(),
                b"p" if table_depth == 0 => {
                    para_text.clear();
                    para_formulas.clear();
                }
                b"t" => in_text = true,
                b"oMath" => {
                    let tree = read_math_tree(&mut reader, "oMath");
                    let notation = convert_markup(&tree);
                    if !notation.is_empty() {
                        math_count += 1;
                        if table_depth == 0 {
                            para_text.push(MATH_PLACEHOLDER);
                            para_formulas.push(notation);
                        } else {
                            cell_text.push_str(&format!("${}$", notation));
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"tab" => {
                    if table_depth == 0 {
                        para_text.push('\t');
                    } else {
                        cell_text.push('\t');
                    }
                }
                b"br" | b"cr" => {
                    if table_depth == 0 {
                        para_text.push('\n');
                    } else {
                        cell_text.push('\n');
                    }
                }
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if table_depth == 0 {
                        let finished = finish_paragraph(&para_text, &para_formulas);
                        if !finished.is_empty() {
                            parts.push(finished);
                        }
                        para_text.clear();
                        para_formulas.clear();
                    } else {
                        // Paragraph break inside a table cell
                        cell_text.push(' ');
                    }
                }
                b"tc" if table_depth == 1 => {
                    let cell = convert_math_symbols(cell_text.trim());
                    if !cell.is_empty() {
                        row_cells.push(cell);
                    }
                    cell_text.clear();
                }
                b"tr" if table_depth == 1 => {
                    if !row_cells.is_empty() {
                        table_lines.push(row_cells.join(CELL_DELIMITER));
                        row_cells.clear();
                    }
                }
                b"tbl" => {
                    table_depth = table_depth.saturating_sub(1);
                    if table_depth == 0 && !table_lines.is_empty() {
                        parts.push(table_lines.join("\n"));
                        table_lines.clear();
                    }
                }
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_text {
                    let text = std::str::from_utf8(&e).unwrap_or_default();
                    if table_depth == 0 {
                        para_text.push_str(text);
                    } else {
                        cell_text.push_str(text);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("Error parsing document XML: {}", e);
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    ExtractedBody {
        text: parts.join("\n\n"),
        math_formulas: math_count,
    }
}

/// Extract plain text from an auxiliary XML part
///
/// All text nodes are space-joined; embedded math subtrees are converted
/// inline in display-math delimiters. Returns the text and the number of
/// formulas converted. Total: XML errors end the walk early.
pub fn extract_xml_text(xml: &[u8]) -> (String, usize) {
    let mut reader = Reader::from_reader(xml);

    let mut pieces: Vec<String> = Vec::new();
    let mut math_count = 0usize;
    let mut current = String::new();
    let mut in_text = false;

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"t" => {
                    in_text = true;
                    current.clear();
                }
                b"oMath" => {
                    let tree = read_math_tree(&mut reader, "oMath");
                    let notation = convert_markup(&tree);
                    if !notation.is_empty() {
                        math_count += 1;
                        pieces.push(format!("$${}$$", notation));
                    }
                }
                _ => {}
            },
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_text = false;
                    if !current.trim().is_empty() {
                        pieces.push(current.trim().to_string());
                    }
                    current.clear();
                }
            }
            Ok(Event::Text(e)) => {
                if in_text {
                    current.push_str(std::str::from_utf8(&e).unwrap_or_default());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("Error parsing auxiliary XML: {}", e);
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    (pieces.join(" "), math_count)
}

/// Consume events up to the end of the current math element and build its
/// markup tree, with namespace prefixes stripped from every tag
///
/// OMML property nodes (`*Pr`) carry formatting only and are dropped so
/// that positional child rules see content children exclusively. Never
/// fails: a malformed subtree yields the tree built so far.
fn read_math_tree<R: BufRead>(reader: &mut Reader<R>, root_tag: &str) -> MarkupElement {
    let mut stack: Vec<MarkupElement> = vec![MarkupElement::new(root_tag)];

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                stack.push(MarkupElement::new(tag));
            }
            Ok(Event::Empty(ref e)) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if !tag.ends_with("Pr") {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(MarkupElement::new(tag));
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(top) = stack.last_mut() {
                    top.push_text(std::str::from_utf8(&e).unwrap_or_default());
                }
            }
            Ok(Event::End(_)) => {
                if stack.len() == 1 {
                    // Matching end of the root element
                    break;
                }
                let finished = stack.pop().unwrap_or_default();
                if !finished.tag.ends_with("Pr") {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(finished);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("Error parsing math subtree: {}", e);
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    stack.into_iter().next().unwrap_or_default()
}

/// Normalize a finished paragraph and splice its formulas in place
fn finish_paragraph(raw: &str, formulas: &[String]) -> String {
    let converted = convert_math_symbols(raw);
    splice_formulas(converted, formulas).trim().to_string()
}

/// Substitute each converted formula for its placeholder, first match
/// first; a formula whose placeholder is gone is appended at the end in
/// display-math delimiters instead
fn splice_formulas(mut text: String, formulas: &[String]) -> String {
    for formula in formulas {
        if text.contains(MATH_PLACEHOLDER) {
            text = text.replacen(MATH_PLACEHOLDER, &format!("${}$", formula), 1);
        } else {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&format!("$${}$$", formula));
        }
    }
    text
}
