use std::fmt;

/// What a single raw line means, with the payload borrowed from the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `!` or `#` in the first column.
    Comment,
    /// Empty or whitespace only.
    Blank,
    /// `BEGIN SECTION <name>` or `BEGIN <name>`; the name is trimmed.
    SectionBegin(&'a str),
    /// `END`, with or without a trailing `SECTION`.
    SectionEnd,
    /// A `%` delimiter line.
    Skip,
    KeyValue { key: &'a str, value: &'a str },
    /// Whitespace-separated tokens, never empty.
    DataRow(Vec<&'a str>),
}

impl fmt::Display for LineKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineKind::Comment => "COMMENT",
            LineKind::Blank => "BLANK",
            LineKind::SectionBegin(_) => "SECTION_BEGIN",
            LineKind::SectionEnd => "SECTION_END",
            LineKind::Skip => "SKIP",
            LineKind::KeyValue { .. } => "KEY_VALUE",
            LineKind::DataRow(_) => "DATA_ROW",
        };
        f.write_str(name)
    }
}
