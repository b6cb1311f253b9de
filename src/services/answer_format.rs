//! Parsers for the three raw answer grammars. All of them are total:
//! malformed input degrades to an empty or best-effort result, never an
//! error, so a garbled submission scores zero instead of failing the
//! request.

/// Single-letter grammar: trim and uppercase. Callers treat only a
/// one-character result as a valid letter.
pub fn parse_simple(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Comma-separated multi-select grammar. Empty tokens are dropped, order
/// is preserved and duplicates are kept (intersection logic downstream
/// works on sets).
pub fn parse_multiple(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|token| token.trim().to_uppercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Letter-digit pair grammar for matching questions. Whitespace is
/// stripped, the rest scanned left-to-right consuming (letter, digit)
/// pairs; a letter without a following digit is silently dropped.
pub fn parse_matching(raw: &str) -> Vec<String> {
    let cleaned: Vec<char> = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(|c| c.to_uppercase())
        .collect();

    let mut pairs = Vec::new();
    let mut i = 0;
    while i < cleaned.len() {
        if cleaned[i].is_alphabetic() {
            if i + 1 < cleaned.len() && cleaned[i + 1].is_ascii_digit() {
                pairs.push(format!("{}{}", cleaned[i], cleaned[i + 1]));
                i += 2;
                continue;
            }
        }
        i += 1;
    }
    pairs
}
