//! colsplit - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for splitting a translations CSV into
//! per-column JSON fragments through the colsplit backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── Hero (title, description)                              │
//! │  ├── UploadSection (drop zone, file picker)                 │
//! │  ├── ColumnPanels (one fragment per column)                 │
//! │  └── LogsPanel (SSE)                                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (LogEntry, PivotResponse, etc.)
//! - [`state`] - Upload sequencing and the displayed snapshot
//! - [`components`] - UI components (Upload, Panels, Logs, etc.)
//! - [`services`] - Backend upload and clipboard access

use leptos::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod components;
pub mod config;
pub mod services;
pub mod state;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Logs
    LogEntry, LogLevel,
    // API
    PivotResponse, ColumnPanel, ResponseMetadata,
    // Errors
    AppError, AppResult,
};

// State
pub use state::{FileSource, Snapshot, UploadGuard, UploadTicket};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Install the panic hook and console logger, then mount the app.
pub fn run() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 colsplit - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    let (snapshot, set_snapshot) = create_signal(Snapshot::default());
    let (logs, set_logs) = create_signal(Vec::<LogEntry>::new());

    // Initialize SSE connection ONCE at app startup
    init_sse_logs(set_logs);

    view! {
        <div class="container">
            <Hero/>

            <UploadSection set_snapshot=set_snapshot set_logs=set_logs/>

            <ColumnPanels snapshot=snapshot/>

            <Show
                when=move || !logs.with(Vec::is_empty)
                fallback=|| view! { }
            >
                <LogsPanel logs=logs set_logs=set_logs/>
            </Show>
        </div>

        <Footer/>
    }
}
