//! CSV upload component with drag & drop support.
//!
//! Every upload takes a ticket from the [`UploadGuard`]; only the latest
//! one may replace the snapshot.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, File, HtmlInputElement};

use super::logs::add_log;
use crate::services::upload_csv;
use crate::state::{check_file, FileSource, Snapshot, UploadGuard};
use crate::{LogEntry, LogLevel, BACKEND_URL};

fn show_alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[component]
pub fn UploadSection(
    set_snapshot: WriteSignal<Snapshot>,
    set_logs: WriteSignal<Vec<LogEntry>>,
) -> impl IntoView {
    let guard = store_value(UploadGuard::default());
    let (pending, set_pending) = create_signal(0usize);
    let (dragging, set_dragging) = create_signal(false);

    let start_upload = move |file: File, source: FileSource| {
        let name = file.name();
        if let Err(e) = check_file(&name, file.size(), source) {
            show_alert(&e.to_string());
            return;
        }

        let ticket = guard.with_value(UploadGuard::begin);
        set_pending.update(|n| *n += 1);
        add_log(set_logs, LogLevel::Info, &format!("📤 Uploading {}...", name));

        spawn_local(async move {
            let result = upload_csv(file, BACKEND_URL).await;
            set_pending.update(|n| *n = n.saturating_sub(1));

            if !guard.with_value(|g| g.is_current(ticket)) {
                log::info!("Dropping stale response for upload #{}", ticket.id());
                return;
            }

            match result {
                Ok(response) => {
                    add_log(
                        set_logs,
                        LogLevel::Success,
                        &format!(
                            "✅ {} columns from {} rows",
                            response.columns.len(),
                            response.metadata.row_count
                        ),
                    );
                    if !response.metadata.key_column_present {
                        add_log(
                            set_logs,
                            LogLevel::Warning,
                            &format!(
                                "Key column '{}' not found in {}",
                                response.metadata.key_column, name
                            ),
                        );
                    }
                    set_snapshot.set(Snapshot::from_response(response));
                }
                Err(e) => {
                    add_log(set_logs, LogLevel::Error, &format!("❌ {}", e));
                    show_alert(&e.to_string());
                }
            }
        });
    };

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            start_upload(file, FileSource::Picker);
        }
        // Allow picking the same file again
        input.set_value("");
    };

    let on_drag_over = move |ev: ev::DragEvent| {
        ev.prevent_default();
        set_dragging.set(true);
    };

    let on_drag_leave = move |_: ev::DragEvent| set_dragging.set(false);

    let on_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        set_dragging.set(false);
        if let Some(file) = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        {
            start_upload(file, FileSource::Drop);
        }
    };

    let trigger_file_input = move |_| {
        if let Some(input) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("fileInput"))
        {
            if let Some(html_input) = input.dyn_ref::<HtmlInputElement>() {
                html_input.click();
            }
        }
    };

    view! {
        <div
            class="upload-section"
            class:dragging=move || dragging.get()
            id="uploadZone"
            on:click=trigger_file_input
            on:dragover=on_drag_over
            on:dragleave=on_drag_leave
            on:drop=on_drop
        >
            <div class="upload-icon">"📤"</div>
            <div class="upload-text">
                {move || if pending.get() > 0 {
                    "⏳ Uploading and splitting..."
                } else {
                    "Drop a CSV file here"
                }}
            </div>
            <div class="upload-hint">"or click to choose one"</div>

            <input
                type="file"
                id="fileInput"
                accept=".csv"
                style="display:none"
                on:click=|ev| ev.stop_propagation()
                on:change=on_file_change
            />
        </div>
    }
}
