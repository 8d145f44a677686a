/// Character cap on the auxiliary section; auxiliary XML text often
/// duplicates body content, so it is advisory only
pub const AUXILIARY_TEXT_CAP: usize = 1000;

const TRUNCATION_MARKER: &str = "...";

/// Merge the four content streams into one sectioned output string
///
/// Sections appear in fixed order, each under a labeled header line, and
/// empty sections are omitted entirely.
pub fn combine_content(body: &str, ole: &str, images: &str, auxiliary: &str) -> String {
    let mut sections = Vec::new();

    if !body.trim().is_empty() {
        sections.push(format!("=== Document Body ===\n{}", body));
    }

    if !ole.trim().is_empty() {
        sections.push(format!("=== OLE Objects and Math Formulas ===\n{}", ole));
    }

    if !images.trim().is_empty() {
        sections.push(format!("=== Images and Charts ===\n{}", images));
    }

    if !auxiliary.trim().is_empty() {
        sections.push(format!(
            "=== Additional Extracted Content ===\n{}",
            truncate_chars(auxiliary, AUXILIARY_TEXT_CAP)
        ));
    }

    sections.join("\n\n")
}

/// Cap text at `limit` characters, appending a marker only when text was cut
fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(limit).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_in_fixed_order() {
        let combined = combine_content("body text", "[OLE object: a.bin, size: 3 bytes]", "[Image: a.png]", "aux text");
        let body_pos = combined.find("=== Document Body ===").unwrap();
        let ole_pos = combined.find("=== OLE Objects and Math Formulas ===").unwrap();
        let image_pos = combined.find("=== Images and Charts ===").unwrap();
        let aux_pos = combined.find("=== Additional Extracted Content ===").unwrap();
        assert!(body_pos < ole_pos);
        assert!(ole_pos < image_pos);
        assert!(image_pos < aux_pos);
    }

    #[test]
    fn test_empty_sections_omitted() {
        let combined = combine_content("only the body", "", "", "");
        assert!(combined.contains("=== Document Body ===\nonly the body"));
        assert!(!combined.contains("OLE Objects"));
        assert!(!combined.contains("Images and Charts"));
        assert!(!combined.contains("Additional Extracted Content"));

        assert_eq!(combine_content("", "", "", ""), "");
    }

    #[test]
    fn test_auxiliary_at_cap_not_truncated() {
        let aux = "x".repeat(AUXILIARY_TEXT_CAP);
        let combined = combine_content("", "", "", &aux);
        assert!(combined.ends_with(&aux));
        assert!(!combined.ends_with("..."));
    }

    #[test]
    fn test_auxiliary_over_cap_truncated_with_marker() {
        let aux = "x".repeat(AUXILIARY_TEXT_CAP + 1);
        let combined = combine_content("", "", "", &aux);
        assert!(combined.ends_with("..."));
        let section_text = combined
            .strip_prefix("=== Additional Extracted Content ===\n")
            .unwrap();
        assert_eq!(section_text.chars().count(), AUXILIARY_TEXT_CAP + 3);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        // Multi-byte glyphs near the cap must not split
        let aux: String = "π".repeat(AUXILIARY_TEXT_CAP + 5);
        let combined = combine_content("", "", "", &aux);
        assert!(combined.ends_with("..."));
        assert!(combined.contains(&"π".repeat(AUXILIARY_TEXT_CAP)));
    }
}
