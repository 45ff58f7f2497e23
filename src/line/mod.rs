//! Line classification shared by every HEMCO dialect.

pub mod classify;
pub mod kind;

pub use classify::classify;
pub use kind::LineKind;
