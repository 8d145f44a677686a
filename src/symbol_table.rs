use regex::Regex;

/// Static mapping from Unicode math glyphs to LaTeX macros
static MATH_SYMBOLS: phf::Map<char, &'static str> = phf::phf_map! {
    // Operators and relations
    '∑' => "\\sum",
    '∏' => "\\prod",
    '∫' => "\\int",
    '√' => "\\sqrt",
    '∞' => "\\infty",
    '∂' => "\\partial",
    '∇' => "\\nabla",
    '≤' => "\\leq",
    '≥' => "\\geq",
    '≠' => "\\neq",
    '≈' => "\\approx",
    '±' => "\\pm",
    '∓' => "\\mp",
    '×' => "\\times",
    '÷' => "\\div",

    // Greek letters
    'α' => "\\alpha",
    'β' => "\\beta",
    'γ' => "\\gamma",
    'δ' => "\\delta",
    'θ' => "\\theta",
    'λ' => "\\lambda",
    'μ' => "\\mu",
    'π' => "\\pi",
    'σ' => "\\sigma",
    'φ' => "\\phi",
    'ω' => "\\omega",
};

lazy_static::lazy_static! {
    // x_12 -> x_{12}
    static ref SUBSCRIPT_RE: Regex = Regex::new(r"([a-zA-Z])_([0-9]+)").unwrap();
    // x^2 -> x^{2}
    static ref SUPERSCRIPT_RE: Regex = Regex::new(r"([a-zA-Z])\^([0-9]+)").unwrap();
}

/// Look up the LaTeX macro for a math glyph
/// Unmapped glyphs are returned unchanged, so the lookup is total.
pub fn lookup(glyph: char) -> String {
    match MATH_SYMBOLS.get(&glyph) {
        Some(macro_text) => (*macro_text).to_string(),
        None => glyph.to_string(),
    }
}

/// Replace every mapped math glyph in a string with its LaTeX macro
pub fn substitute_symbols(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match MATH_SYMBOLS.get(&ch) {
            Some(macro_text) => result.push_str(macro_text),
            None => result.push(ch),
        }
    }
    result
}

/// Convert bare math notation found in plain run text to LaTeX
///
/// Applies the symbol substitutions plus two normalizations: a trailing
/// `_digits` token becomes a braced subscript and a trailing `^digits`
/// token becomes a braced superscript. Text that is already in LaTeX form
/// passes through unchanged.
pub fn convert_math_symbols(text: &str) -> String {
    let substituted = substitute_symbols(text);
    let subscripted = SUBSCRIPT_RE.replace_all(&substituted, "${1}_{${2}}");
    let superscripted = SUPERSCRIPT_RE.replace_all(&subscripted, "${1}^{${2}}");
    superscripted.into_owned()
}
