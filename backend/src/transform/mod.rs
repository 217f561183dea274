//! Transformation module.
//!
//! - Pivot: records → one key/value mapping per column
//! - Format: mappings → paste-ready JSON fragments
//! - Pipeline: parse → pivot → format for one input

pub mod format;
pub mod pipeline;
pub mod pivot;

pub use format::{format_document, format_fragment, strip_outer_braces, to_pretty_json};
pub use pipeline::*;
pub use pivot::{pivot_column, pivot_columns};
