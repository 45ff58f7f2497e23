use std::fmt;

/// Input the parser tolerates but reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// `BEGIN` on `line` was never closed by an `END`.
    UnterminatedSection { section: String, line: usize },
    /// The section holds both `key: value` settings and row groups;
    /// `line` is where the mix first appeared.
    AmbiguousSectionBody { section: String, line: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnterminatedSection { section, line } => {
                write!(f, "section {section:?} opened at line {line} is never closed")
            }
            Warning::AmbiguousSectionBody { section, line } => write!(
                f,
                "section {section:?} mixes settings and rows (line {line})"
            ),
        }
    }
}
