//! Encoder implementations

pub mod entry;
pub mod text;

pub use entry::{FIELD_SEPARATOR, LEVEL_WIDTH};
pub use text::TextEncoder;
