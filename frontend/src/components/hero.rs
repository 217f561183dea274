//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"colsplit"</h1>
            <p class="subtitle">
                "Drop a translations CSV to get one JSON fragment per language column, "
                "keyed by the RU column. Click a panel to copy it."
            </p>
        </div>
    }
}
