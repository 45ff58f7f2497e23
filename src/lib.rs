//! Convert HEMCO configuration files (main config, diagnostics list, species
//! table, grid definition) into YAML.
//!
//! The pipeline is `line` (classify) -> `build` (sections, rows, warnings)
//! -> `model` (the tree) -> `render` (YAML).

pub mod build;
pub mod dialect;
pub mod error;
pub mod line;
pub mod model;
pub mod render;
pub mod root;

pub use build::{Parsed, Warning, parse_file, parse_lines, parse_str};
pub use dialect::Dialect;
pub use error::{ConvertError, Result};
pub use model::{ConfigTree, Entry, Node, SectionBody};
