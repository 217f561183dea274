//! Application configuration.
//!
//! Centralized configuration for the colsplit frontend.
//! In development, these are hardcoded. In production, they could be
//! loaded from environment or a config file.

/// Backend API base URL.
///
/// The colsplit backend server that parses and pivots uploads.
pub const BACKEND_URL: &str = "http://localhost:3000";

/// Maximum file size for upload (in bytes).
///
/// 50 MB limit, same as the backend default.
pub const MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

/// Maximum logs to keep in memory.
pub const MAX_LOG_ENTRIES: usize = 100;

/// How long the "Copied to clipboard!" notice stays up.
pub const NOTIFICATION_MS: u32 = 2_000;
