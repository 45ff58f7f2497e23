//! The four HEMCO file grammars and what each one decodes rows into.
//!
//! All dialects share the comment, blank-line and `BEGIN`/`END` conventions;
//! they differ in the section marker, whether `key: value` lines are
//! recognised, and the column layout of data rows.

pub mod row;

pub use row::{Decoded, DiagnRecord, RowDecoder, SpeciesRecord};

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// HEMCO_Config.rc: `BEGIN SECTION` blocks of settings and token rows.
    Config,
    /// HEMCO_Diagn.rc: `BEGIN` blocks of fixed-layout diagnostic rows.
    Diagnostics,
    /// Species table: `BEGIN` blocks of per-species physical constants.
    Species,
    /// Grid definition: flat `key: value # comment` lines.
    Grid,
}

impl Dialect {
    /// Marker that opens a section, or `None` when the dialect has no sections.
    pub fn begin_marker(self) -> Option<&'static str> {
        match self {
            Dialect::Config => Some("BEGIN SECTION"),
            Dialect::Diagnostics | Dialect::Species => Some("BEGIN"),
            Dialect::Grid => None,
        }
    }

    /// Diagnostic long names routinely contain ':', so only the settings
    /// dialects treat a colon as a key/value separator.
    pub fn accepts_key_values(self) -> bool {
        matches!(self, Dialect::Config | Dialect::Grid)
    }

    pub fn strips_inline_comments(self) -> bool {
        matches!(self, Dialect::Grid)
    }

    /// Key/value lines outside any section are kept only for flat files.
    pub fn is_flat(self) -> bool {
        self.begin_marker().is_none()
    }

    pub fn decoder(self) -> Option<RowDecoder> {
        match self {
            Dialect::Config => Some(RowDecoder::Generic),
            Dialect::Diagnostics => Some(RowDecoder::Diagnostics),
            Dialect::Species => Some(RowDecoder::Species),
            Dialect::Grid => None,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dialect::Config => "config",
            Dialect::Diagnostics => "diagnostics",
            Dialect::Species => "species",
            Dialect::Grid => "grid",
        };
        f.write_str(name)
    }
}
