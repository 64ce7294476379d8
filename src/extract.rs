use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Fixed substring that precedes the embedded data payload in the page.
pub const MARKER: &str = "var FB_LOAD_DATA_ =";

static ALT_LITERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(None|True|False)\b").unwrap());
static TRAILING_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([\]}])").unwrap());

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("embedded data marker not found in page")]
    MarkerNotFound,
    #[error("no array literal after the embedded data marker")]
    ArrayStartNotFound,
    #[error("embedded array literal never closes")]
    ArrayUnterminated,
    #[error("embedded array failed to deserialize: {0}")]
    Deserialization(#[from] serde_json::Error),
}

/// Locate the embedded payload after the marker and deserialize it.
///
/// The array literal is delimited by a plain bracket-depth scan, then parsed
/// strictly, then through a tolerant rewrite of near-JSON dialects, then
/// once more after re-truncating at the first depth-zero point. The first
/// success wins; only exhaustion of the chain is an error.
pub fn extract(raw: &str) -> Result<Value, ExtractError> {
    let after_marker = raw
        .split_once(MARKER)
        .map(|(_, rest)| rest)
        .ok_or(ExtractError::MarkerNotFound)?;
    let start = after_marker
        .find('[')
        .ok_or(ExtractError::ArrayStartNotFound)?;
    let sliced = &after_marker[start..];
    let end = balanced_end(sliced).ok_or(ExtractError::ArrayUnterminated)?;
    let literal = &sliced[..end];

    let strict_err = match serde_json::from_str(literal) {
        Ok(v) => return Ok(v),
        Err(e) => e,
    };
    debug!("strict parse failed: {strict_err}");

    if let Ok(v) = tolerant(literal) {
        return Ok(v);
    }

    // Re-truncate at the first depth-zero point and retry both paths on
    // that slice before giving up.
    if let Some(end) = balanced_end(literal) {
        let truncated = &literal[..end];
        if let Ok(v) = serde_json::from_str(truncated) {
            return Ok(v);
        }
        if let Ok(v) = tolerant(truncated) {
            return Ok(v);
        }
    }

    Err(ExtractError::Deserialization(strict_err))
}

/// Byte offset one past the `]` where bracket depth first returns to zero.
///
/// This is a textual scan, not a tokenizer: brackets inside string literals
/// are counted too, so payload text containing a lone `[` or `]` can
/// mis-delimit the literal.
fn balanced_end(s: &str) -> Option<usize> {
    let mut depth = 0i64;
    for (i, c) in s.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Tolerant fallback: normalize alternate null/boolean spellings, drop stray
/// trailing terminators and trailing commas, re-attempt deserialization.
fn tolerant(literal: &str) -> Result<Value, serde_json::Error> {
    let respelled = ALT_LITERAL_RE.replace_all(literal, |caps: &regex::Captures| {
        match &caps[1] {
            "None" => "null",
            "True" => "true",
            _ => "false",
        }
    });

    let mut trimmed = respelled.trim_end();
    while trimmed.ends_with(';') || trimmed.ends_with('}') {
        trimmed = &trimmed[..trimmed.len() - 1];
    }

    let cleaned = TRAILING_COMMA_RE.replace_all(trimmed, "$1");
    serde_json::from_str(&cleaned)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(payload: &str) -> String {
        format!("<script>var x = 1;{MARKER}{payload};</script></html>")
    }

    #[test]
    fn missing_marker() {
        let err = extract("<html>no payload here [1,2,3]</html>").unwrap_err();
        assert!(matches!(err, ExtractError::MarkerNotFound));
    }

    #[test]
    fn missing_array_start() {
        let err = extract(&format!("{MARKER} no array follows")).unwrap_err();
        assert!(matches!(err, ExtractError::ArrayStartNotFound));
    }

    #[test]
    fn unterminated_array() {
        let err = extract(&format!("{MARKER} [[1, 2")).unwrap_err();
        assert!(matches!(err, ExtractError::ArrayUnterminated));
    }

    #[test]
    fn unparseable_literal() {
        let err = extract(&format!("{MARKER} [}}{{]")).unwrap_err();
        assert!(matches!(err, ExtractError::Deserialization(_)));
    }

    #[test]
    fn strict_path_matches_direct_parse() {
        let literal = r#"[null, [1, "два", [true, false]], 3.5]"#;
        let got = extract(&page(literal)).unwrap();
        let direct: Value = serde_json::from_str(literal).unwrap();
        assert_eq!(got, direct);
    }

    #[test]
    fn surrounding_text_ignored() {
        let got = extract(&page("[1, [2, 3]]")).unwrap();
        assert_eq!(got, json!([1, [2, 3]]));
    }

    #[test]
    fn alternate_spellings_parsed_tolerantly() {
        let got = extract(&page("[None, [True, False], \"text\"]")).unwrap();
        assert_eq!(got, json!([null, [true, false], "text"]));
    }

    #[test]
    fn spellings_inside_strings_survive_strict_path() {
        let got = extract(&page(r#"["None of the above", true]"#)).unwrap();
        assert_eq!(got, json!(["None of the above", true]));
    }

    #[test]
    fn trailing_comma_tolerated() {
        let got = extract(&page("[1, 2, ]")).unwrap();
        assert_eq!(got, json!([1, 2]));
    }

    #[test]
    fn nested_brackets_delimited_correctly() {
        // The first depth-zero `]` ends the literal; trailing arrays after
        // it belong to the page, not the payload.
        let raw = format!("{MARKER} [[1], [2, [3]]] var other = [9];");
        let got = extract(&raw).unwrap();
        assert_eq!(got, json!([[1], [2, [3]]]));
    }

    #[test]
    fn fixture_page_extracts() {
        let html = std::fs::read_to_string("tests/fixtures/form.html").unwrap();
        let root = extract(&html).unwrap();
        assert!(root.as_array().is_some_and(|a| a.len() >= 15));
    }
}
