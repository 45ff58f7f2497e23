//! Error types for reading, decoding and writing HEMCO configuration files.

use crate::dialect::Dialect;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a conversion.
///
/// Lenient conditions (unterminated sections, mixed section bodies) are not
/// errors; they are reported as [`crate::Warning`]s next to the tree.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input file is missing or unreadable.
    #[error("cannot read {}: {source}", path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A data row has fewer columns than the dialect's row layout needs.
    #[error(
        "{dialect} row at line {line} needs at least {expected} columns, found {found}: {content:?}"
    )]
    SchemaViolation {
        dialect: Dialect,
        line: usize,
        expected: usize,
        found: usize,
        content: String,
    },

    /// The YAML artifact could not be written.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Column-count failure raised by a row decoder before the line is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected at least {expected} columns, found {found}")]
pub struct SchemaError {
    pub expected: usize,
    pub found: usize,
}

pub type Result<T> = std::result::Result<T, ConvertError>;
