//! Upload sequencing and the displayed result.
//!
//! Each upload takes a ticket from [`UploadGuard`]. Only the completion
//! holding the latest ticket may replace the [`Snapshot`]; anything older
//! is dropped so a slow response can never overwrite a newer one.

use std::cell::Cell;

use crate::types::{AppError, AppResult, ColumnPanel, PivotResponse, ResponseMetadata};
use crate::MAX_FILE_SIZE;

/// Ticket handed out by [`UploadGuard::begin`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadTicket(u64);

impl UploadTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Monotonic upload counter.
#[derive(Debug, Default)]
pub struct UploadGuard {
    latest: Cell<u64>,
}

impl UploadGuard {
    /// Start a new upload, superseding every earlier ticket.
    pub fn begin(&self) -> UploadTicket {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        UploadTicket(next)
    }

    /// Whether `ticket` is still the most recent upload.
    pub fn is_current(&self, ticket: UploadTicket) -> bool {
        self.latest.get() == ticket.0
    }
}

/// What the page shows for the last successful upload.
///
/// Replaced whole on success, never patched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub job_id: String,
    pub file_name: Option<String>,
    pub panels: Vec<ColumnPanel>,
    pub metadata: Option<ResponseMetadata>,
}

impl Snapshot {
    pub fn from_response(response: PivotResponse) -> Self {
        Self {
            job_id: response.job_id,
            file_name: response.file_name,
            panels: response.columns,
            metadata: Some(response.metadata),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.is_none()
    }

    /// Panels paired with a key unique across snapshots.
    pub fn keyed_panels(&self) -> Vec<(String, ColumnPanel)> {
        self.panels
            .iter()
            .map(|p| (format!("{}:{}", self.job_id, p.name), p.clone()))
            .collect()
    }
}

/// Where a file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSource {
    /// The `.csv`-filtered file picker
    Picker,
    /// Dropped onto the upload area, any extension
    Drop,
}

/// Refuse files the backend would reject anyway.
///
/// Only picked files must be named `*.csv`; dropped files are sent as is.
pub fn check_file(name: &str, size: f64, source: FileSource) -> AppResult<()> {
    if source == FileSource::Picker && !name.to_ascii_lowercase().ends_with(".csv") {
        return Err(AppError::Validation(format!("'{name}' is not a .csv file")));
    }
    if size > MAX_FILE_SIZE as f64 {
        return Err(AppError::Validation(format!(
            "'{name}' is larger than {} MB",
            MAX_FILE_SIZE / (1024 * 1024)
        )));
    }
    Ok(())
}
