//! One panel per column, click to copy its fragment.

use gloo_timers::future::TimeoutFuture;
use leptos::*;

use crate::services::copy_to_clipboard;
use crate::state::Snapshot;
use crate::{ColumnPanel, NOTIFICATION_MS};

#[component]
pub fn ColumnPanels(snapshot: ReadSignal<Snapshot>) -> impl IntoView {
    let (notice, set_notice) = create_signal(None::<&'static str>);
    // Bumped per copy so an older timer does not hide a newer notice
    let (notice_id, set_notice_id) = create_signal(0u32);

    let on_copy = move |fragment: String| {
        spawn_local(async move {
            match copy_to_clipboard(&fragment).await {
                Ok(()) => {
                    let id = notice_id.get_untracked() + 1;
                    set_notice_id.set(id);
                    set_notice.set(Some("Copied to clipboard!"));

                    TimeoutFuture::new(NOTIFICATION_MS).await;
                    if notice_id.get_untracked() == id {
                        set_notice.set(None);
                    }
                }
                Err(e) => log::error!("{}", e),
            }
        });
    };

    let summary = move || {
        snapshot.with(|s| {
            s.metadata.as_ref().map(|m| {
                format!(
                    "{} · {} rows · {} · '{}' · key {}",
                    s.file_name.as_deref().unwrap_or("upload"),
                    m.row_count,
                    m.encoding,
                    m.delimiter,
                    m.key_column
                )
            })
        })
    };

    view! {
        <Show when=move || !snapshot.with(Snapshot::is_empty) fallback=|| view! {}>
            <div class="panels">
                <div class="panels-summary">{summary}</div>
                <For
                    each=move || snapshot.with(Snapshot::keyed_panels)
                    key=|(key, _)| key.clone()
                    children=move |(_, panel)| view! { <Panel panel=panel on_copy=on_copy/> }
                />
            </div>
        </Show>

        <Show when=move || notice.get().is_some() fallback=|| view! {}>
            <div class="notification">{move || notice.get().unwrap_or_default()}</div>
        </Show>
    }
}

#[component]
fn Panel<F>(panel: ColumnPanel, on_copy: F) -> impl IntoView
where
    F: Fn(String) + Copy + 'static,
{
    let ColumnPanel {
        name,
        fragment,
        entries,
        skipped,
    } = panel;
    let copy_text = fragment.clone();

    view! {
        <div class="column-panel" title="Click to copy" on:click=move |_| on_copy(copy_text.clone())>
            <div class="column-panel-header">
                <span class="column-title">{name}</span>
                <span class="column-counts">
                    {format!("{} entries, {} skipped", entries, skipped)}
                </span>
            </div>
            <pre><code>{fragment}</code></pre>
        </div>
    }
}
