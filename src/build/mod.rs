//! Turning classified lines into a [`ConfigTree`](crate::ConfigTree).
//!
//! `SectionBuilder` owns the cursor (open section, open subsection) and the
//! tree under construction; `assemble` folds a line source through it.

pub mod assemble;
pub mod section;
pub mod warning;

pub use assemble::{Parsed, parse_file, parse_lines, parse_str};
pub use section::SectionBuilder;
pub use warning::Warning;
