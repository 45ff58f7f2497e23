//! Rendering a completed tree to its on-disk artifact.

pub mod yaml;

pub use yaml::{to_yaml, write_yaml};
