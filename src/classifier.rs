use crate::container::{ContainerEntry, EntryClassification};

/// Byte-length threshold above which an image is assumed to be a complex figure
const LARGE_IMAGE_BYTES: usize = 50000;
/// Byte-length threshold above which an image is assumed to hold a formula or chart
const MEDIUM_IMAGE_BYTES: usize = 10000;

/// Describe an embedded OLE object entry
///
/// No OLE decoder exists here, so the note is informational: path and byte
/// length when the bytes were readable, a placeholder otherwise.
pub fn describe_ole_object(entry: &ContainerEntry) -> String {
    let label = match entry.classification {
        EntryClassification::EmbeddedMath => "Math object",
        _ => "OLE object",
    };

    match &entry.data {
        Some(data) => format!("[{}: {}, size: {} bytes]", label, entry.path, data.len()),
        None => format!("[{}: {} - could not be read]", label, entry.path),
    }
}

/// Describe an image entry from its name and size alone
///
/// The size tiers are deliberately coarse placeholders for content a real
/// image classifier would be needed to decode.
pub fn describe_image(entry: &ContainerEntry) -> String {
    let Some(data) = &entry.data else {
        return format!("[Image: {} - could not be read]", entry.path);
    };

    let name = entry.path.rsplit('/').next().unwrap_or(&entry.path);
    let mut parts = vec![format!("[Image: {}]", name)];
    parts.push(size_tier(data.len()).to_string());
    if let Some(guess) = guess_content_type(&entry.path) {
        parts.push(guess.to_string());
    }

    parts.join(" ")
}

fn size_tier(size: usize) -> &'static str {
    if size > LARGE_IMAGE_BYTES {
        "[Likely contains: complex chart, geometric figure or detailed illustration]"
    } else if size > MEDIUM_IMAGE_BYTES {
        "[Likely contains: math formula, simple chart or example figure]"
    } else {
        "[Likely contains: math symbol, small icon or simple marker]"
    }
}

/// Guess image content from filename keywords, first match wins
fn guess_content_type(path: &str) -> Option<&'static str> {
    let lower = path.to_ascii_lowercase();
    if ["graph", "chart"].iter().any(|k| lower.contains(k)) {
        Some("[Guessed type: chart]")
    } else if ["formula", "equation"].iter().any(|k| lower.contains(k)) {
        Some("[Guessed type: math formula]")
    } else if ["geometry", "shape"].iter().any(|k| lower.contains(k)) {
        Some("[Guessed type: geometric figure]")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, data: Option<Vec<u8>>, classification: EntryClassification) -> ContainerEntry {
        ContainerEntry {
            path: path.to_string(),
            data,
            classification,
        }
    }

    #[test]
    fn test_describe_readable_math_object() {
        let e = entry(
            "word/embeddings/oleObject1.bin",
            Some(vec![0u8; 128]),
            EntryClassification::EmbeddedMath,
        );
        assert_eq!(
            describe_ole_object(&e),
            "[Math object: word/embeddings/oleObject1.bin, size: 128 bytes]"
        );
    }

    #[test]
    fn test_describe_unreadable_ole_object() {
        let e = entry(
            "customXml/embeddings/object.bin",
            None,
            EntryClassification::OleObject,
        );
        assert_eq!(
            describe_ole_object(&e),
            "[OLE object: customXml/embeddings/object.bin - could not be read]"
        );
    }

    #[test]
    fn test_image_size_tier_boundaries() {
        let low = entry(
            "word/media/image1.png",
            Some(vec![0u8; 10000]),
            EntryClassification::Image,
        );
        assert!(describe_image(&low).contains("math symbol, small icon"));

        let medium = entry(
            "word/media/image1.png",
            Some(vec![0u8; 10001]),
            EntryClassification::Image,
        );
        assert!(describe_image(&medium).contains("math formula, simple chart"));

        let edge = entry(
            "word/media/image1.png",
            Some(vec![0u8; 50000]),
            EntryClassification::Image,
        );
        assert!(describe_image(&edge).contains("math formula, simple chart"));

        let high = entry(
            "word/media/image1.png",
            Some(vec![0u8; 50001]),
            EntryClassification::Image,
        );
        assert!(describe_image(&high).contains("complex chart, geometric figure"));
    }

    #[test]
    fn test_image_uses_basename() {
        let e = entry(
            "word/media/image1.png",
            Some(vec![0u8; 100]),
            EntryClassification::Image,
        );
        let description = describe_image(&e);
        assert!(description.starts_with("[Image: image1.png]"));
        assert!(!description.contains("[Image: word/media"));
    }

    #[test]
    fn test_image_keyword_guesses() {
        let chart = entry(
            "word/media/sales_chart.png",
            Some(vec![0u8; 100]),
            EntryClassification::Image,
        );
        assert!(describe_image(&chart).contains("[Guessed type: chart]"));

        let formula = entry(
            "word/media/Equation3.emf",
            Some(vec![0u8; 100]),
            EntryClassification::Image,
        );
        assert!(describe_image(&formula).contains("[Guessed type: math formula]"));

        let shape = entry(
            "word/media/shape_outline.png",
            Some(vec![0u8; 100]),
            EntryClassification::Image,
        );
        assert!(describe_image(&shape).contains("[Guessed type: geometric figure]"));

        // Chart keywords take priority over formula keywords
        let both = entry(
            "word/media/formula_chart.png",
            Some(vec![0u8; 100]),
            EntryClassification::Image,
        );
        assert!(describe_image(&both).contains("[Guessed type: chart]"));

        let plain = entry(
            "word/media/image7.png",
            Some(vec![0u8; 100]),
            EntryClassification::Image,
        );
        assert!(!describe_image(&plain).contains("Guessed type"));
    }

    #[test]
    fn test_unreadable_image() {
        let e = entry("word/media/broken.png", None, EntryClassification::Image);
        assert_eq!(
            describe_image(&e),
            "[Image: word/media/broken.png - could not be read]"
        );
    }
}
