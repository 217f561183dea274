//! UI Components for the colsplit application.
//!
//! # Layout Components
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadSection`] - CSV file upload with drag & drop
//! - [`ColumnPanels`] - One copyable fragment per column
//! - [`LogsPanel`] - Real-time processing logs (SSE)

mod footer;
mod hero;
mod logs;
mod panels;
mod upload;

pub use footer::*;
pub use hero::*;
pub use logs::*;
pub use panels::*;
pub use upload::*;
