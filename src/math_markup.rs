use crate::symbol_table::substitute_symbols;

/// A node in a parsed math-markup subtree
///
/// Tags are stored with their namespace prefix already stripped, so an
/// `m:f` element and a `mfrac` element dispatch on `f` and `mfrac`.
/// Trees are built once from the document XML, converted, then discarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkupElement {
    pub tag: String,
    pub text: Option<String>,
    pub children: Vec<MarkupElement>,
}

impl MarkupElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Append text content to this node
    pub fn push_text(&mut self, text: &str) {
        self.text.get_or_insert_with(String::new).push_str(text);
    }
}

/// Known math-markup tags, covering both the MathML spellings and the
/// OMML spellings used in Word documents
///
/// Child counts are conventions of the schema, not guarantees: every arm
/// reads children through a bounds-checked accessor that yields an empty
/// conversion for a missing child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MathTag {
    /// `mi` / `mn`: identifier or number leaf
    Leaf,
    /// `mo`: operator leaf, run through the symbol table
    Operator,
    /// `mfrac` / `f`: numerator, denominator
    Fraction,
    /// `msup` / `sSup`: base, exponent
    Superscript,
    /// `msub` / `sSub`: base, subscript
    Subscript,
    /// `msubsup` / `sSubSup`: base, subscript, superscript
    SubSuperscript,
    /// `mroot`: radicand, index
    Root,
    /// `rad`: index, radicand (OMML stores the degree first)
    Radical,
    /// `msqrt`: radicand
    Sqrt,
    /// Grouping rows and OMML argument wrappers: children in order
    Row,
    /// `mtext` / `ms` / `t`: literal text leaf
    Text,
    /// `mspace`: a single space
    Space,
    Unknown,
}

impl MathTag {
    fn from_tag(tag: &str) -> Self {
        match tag {
            "mi" | "mn" => MathTag::Leaf,
            "mo" => MathTag::Operator,
            "mfrac" | "f" => MathTag::Fraction,
            "msup" | "sSup" => MathTag::Superscript,
            "msub" | "sSub" => MathTag::Subscript,
            "msubsup" | "sSubSup" => MathTag::SubSuperscript,
            "mroot" => MathTag::Root,
            "rad" => MathTag::Radical,
            "msqrt" => MathTag::Sqrt,
            "mrow" | "r" | "e" | "num" | "den" | "sub" | "sup" | "deg" | "oMath" | "oMathPara" => {
                MathTag::Row
            }
            "mtext" | "ms" | "t" => MathTag::Text,
            "mspace" => MathTag::Space,
            _ => MathTag::Unknown,
        }
    }
}

/// Convert a math-markup tree to LaTeX notation
///
/// Total function: malformed or unknown structure degrades to best-effort
/// text concatenation and never panics.
pub fn convert_markup(element: &MarkupElement) -> String {
    match MathTag::from_tag(&element.tag) {
        MathTag::Leaf | MathTag::Text => element.text.clone().unwrap_or_default(),
        MathTag::Operator => substitute_symbols(element.text.as_deref().unwrap_or_default()),
        MathTag::Fraction => format!(
            "\\frac{{{}}}{{{}}}",
            convert_child(element, 0),
            convert_child(element, 1)
        ),
        MathTag::Superscript => format!(
            "{}^{{{}}}",
            convert_child(element, 0),
            convert_child(element, 1)
        ),
        MathTag::Subscript => format!(
            "{}_{{{}}}",
            convert_child(element, 0),
            convert_child(element, 1)
        ),
        MathTag::SubSuperscript => format!(
            "{}_{{{}}}^{{{}}}",
            convert_child(element, 0),
            convert_child(element, 1),
            convert_child(element, 2)
        ),
        MathTag::Root => format!(
            "\\sqrt[{}]{{{}}}",
            convert_child(element, 1),
            convert_child(element, 0)
        ),
        MathTag::Radical => {
            let index = convert_child(element, 0);
            let radicand = convert_child(element, 1);
            if index.is_empty() {
                format!("\\sqrt{{{}}}", radicand)
            } else {
                format!("\\sqrt[{}]{{{}}}", index, radicand)
            }
        }
        MathTag::Sqrt => format!("\\sqrt{{{}}}", convert_child(element, 0)),
        MathTag::Row => convert_children(element),
        MathTag::Space => " ".to_string(),
        MathTag::Unknown => {
            // Unrecognized schema extensions keep their text and children
            // so no structural content is silently dropped
            let mut result = element.text.clone().unwrap_or_default();
            result.push_str(&convert_children(element));
            result
        }
    }
}

/// Convert the child at `index`, treating a missing child as empty
fn convert_child(element: &MarkupElement, index: usize) -> String {
    element
        .children
        .get(index)
        .map(convert_markup)
        .unwrap_or_default()
}

fn convert_children(element: &MarkupElement) -> String {
    element.children.iter().map(convert_markup).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(tag: &str, text: &str) -> MarkupElement {
        MarkupElement {
            tag: tag.to_string(),
            text: Some(text.to_string()),
            children: Vec::new(),
        }
    }

    fn node(tag: &str, children: Vec<MarkupElement>) -> MarkupElement {
        MarkupElement {
            tag: tag.to_string(),
            text: None,
            children,
        }
    }

    #[test]
    fn test_fraction() {
        let frac = node("mfrac", vec![leaf("mi", "a"), leaf("mi", "b")]);
        assert_eq!(convert_markup(&frac), "\\frac{a}{b}");
    }

    #[test]
    fn test_fraction_with_no_children() {
        // Missing children behave as empty elements
        let frac = node("mfrac", vec![]);
        assert_eq!(convert_markup(&frac), "\\frac{}{}");
    }

    #[test]
    fn test_superscript_and_subscript() {
        let sup = node("msup", vec![leaf("mi", "x"), leaf("mn", "2")]);
        assert_eq!(convert_markup(&sup), "x^{2}");

        let sub = node("msub", vec![leaf("mi", "a"), leaf("mn", "0")]);
        assert_eq!(convert_markup(&sub), "a_{0}");
    }

    #[test]
    fn test_sub_superscript() {
        let tree = node(
            "msubsup",
            vec![leaf("mi", "x"), leaf("mn", "1"), leaf("mn", "2")],
        );
        assert_eq!(convert_markup(&tree), "x_{1}^{2}");
    }

    #[test]
    fn test_roots() {
        let root = node("mroot", vec![leaf("mi", "x"), leaf("mn", "3")]);
        assert_eq!(convert_markup(&root), "\\sqrt[3]{x}");

        let sqrt = node("msqrt", vec![leaf("mi", "y")]);
        assert_eq!(convert_markup(&sqrt), "\\sqrt{y}");
    }

    #[test]
    fn test_omml_radical_degree_comes_first() {
        let rad = node(
            "rad",
            vec![
                node("deg", vec![leaf("t", "3")]),
                node("e", vec![leaf("t", "x")]),
            ],
        );
        assert_eq!(convert_markup(&rad), "\\sqrt[3]{x}");

        let plain = node(
            "rad",
            vec![node("deg", vec![]), node("e", vec![leaf("t", "x")])],
        );
        assert_eq!(convert_markup(&plain), "\\sqrt{x}");
    }

    #[test]
    fn test_operator_uses_symbol_table() {
        let op = leaf("mo", "±");
        assert_eq!(convert_markup(&op), "\\pm");

        let unknown_op = leaf("mo", "!");
        assert_eq!(convert_markup(&unknown_op), "!");
    }

    #[test]
    fn test_row_concatenates_in_order() {
        let row = node(
            "mrow",
            vec![leaf("mi", "a"), leaf("mo", "+"), leaf("mi", "b")],
        );
        assert_eq!(convert_markup(&row), "a+b");
    }

    #[test]
    fn test_omml_fraction_spelling() {
        let frac = node(
            "f",
            vec![
                node("num", vec![node("r", vec![leaf("t", "a")])]),
                node("den", vec![node("r", vec![leaf("t", "b")])]),
            ],
        );
        assert_eq!(convert_markup(&frac), "\\frac{a}{b}");
    }

    #[test]
    fn test_space_and_empty_leaf() {
        assert_eq!(convert_markup(&node("mspace", vec![])), " ");
        assert_eq!(convert_markup(&node("mi", vec![])), "");
    }

    #[test]
    fn test_unknown_tag_keeps_text_and_children() {
        let mut custom = node("annotation", vec![leaf("mi", "x")]);
        custom.text = Some("note:".to_string());
        assert_eq!(convert_markup(&custom), "note:x");
    }

    #[test]
    fn test_nested_structure() {
        // (a + 1) / sqrt(b)
        let tree = node(
            "mfrac",
            vec![
                node(
                    "mrow",
                    vec![leaf("mi", "a"), leaf("mo", "+"), leaf("mn", "1")],
                ),
                node("msqrt", vec![leaf("mi", "b")]),
            ],
        );
        assert_eq!(convert_markup(&tree), "\\frac{a+1}{\\sqrt{b}}");
    }
}
