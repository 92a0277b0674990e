//! Log Panel Component
//!
//! Diagnostics view over the in-memory log buffer.

use leptos::prelude::*;

#[component]
pub fn LogPanel() -> impl IntoView {
    let (lines, set_lines) = signal(rolling_logger::recent_lines());
    let (filter, set_filter) = signal(String::new());

    let shown = move || {
        let needle = filter.get().to_lowercase();
        lines
            .get()
            .into_iter()
            .rev()
            .filter(|line| needle.is_empty() || line.to_lowercase().contains(&needle))
            .collect::<Vec<_>>()
    };

    view! {
        <section class="log-panel">
            <header class="log-toolbar">
                <h2>"Diagnostics"</h2>
                <input
                    type="search"
                    placeholder="Filter log lines"
                    prop:value=move || filter.get()
                    on:input=move |ev| set_filter.set(event_target_value(&ev))
                />
                <button on:click=move |_| set_lines.set(rolling_logger::recent_lines())>"Refresh"</button>
            </header>
            <pre class="log-lines">
                {move || shown().join("\n")}
            </pre>
        </section>
    }
}
