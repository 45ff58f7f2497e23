use crate::dialect::Dialect;
use crate::line::LineKind;
use regex::Regex;
use std::sync::LazyLock;

// The name is optional so that a bare marker still opens a (nameless) section.
static BEGIN_SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^BEGIN\s+SECTION(?:\s+(.*?))?\s*$").expect("valid BEGIN SECTION pattern")
});
static BEGIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^BEGIN(?:\s+(.*?))?\s*$").expect("valid BEGIN pattern"));
static END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^END(?:\s|$)").expect("valid END pattern"));

/// Classify one raw line (terminator optional) for the given dialect.
///
/// Rules apply in order: comment, blank, section begin, section end,
/// delimiter, key/value (only for dialects that accept them), data row.
/// Comment characters and markers only count in the first column.
pub fn classify(raw: &str, dialect: Dialect) -> LineKind<'_> {
    let text = raw.trim_end_matches(['\n', '\r']);

    if text.starts_with('!') || text.starts_with('#') {
        return LineKind::Comment;
    }
    if text.trim().is_empty() {
        return LineKind::Blank;
    }

    if let Some(marker) = dialect.begin_marker() {
        let re = if marker == "BEGIN SECTION" {
            &*BEGIN_SECTION_RE
        } else {
            &*BEGIN_RE
        };
        if let Some(caps) = re.captures(text) {
            let name = caps.get(1).map_or("", |m| m.as_str().trim());
            return LineKind::SectionBegin(name);
        }
    }

    if END_RE.is_match(text) {
        return LineKind::SectionEnd;
    }

    if text.starts_with('%') {
        return LineKind::Skip;
    }

    if dialect.accepts_key_values() {
        if let Some((key, value)) = text.split_once(':') {
            let value = if dialect.strips_inline_comments() {
                value.split('#').next().unwrap_or_default()
            } else {
                value
            };
            return LineKind::KeyValue {
                key: key.trim(),
                value: value.trim(),
            };
        }
    }

    LineKind::DataRow(text.split_whitespace().collect())
}
