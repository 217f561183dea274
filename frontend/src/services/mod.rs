//! Browser and backend services.
//!
//! # Services
//!
//! - [`upload`] - CSV upload to the colsplit backend
//! - [`clipboard`] - Copying fragments to the system clipboard

pub mod clipboard;
pub mod upload;

pub use clipboard::*;
pub use upload::*;
