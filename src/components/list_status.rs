//! List Status Components
//!
//! Loading, error and paging chrome shared by every list screen. Failures
//! are never retried automatically; the banner offers a manual Retry.

use leptos::prelude::*;
use paged_collection::{ErrorKind, FetchError};

/// Error banner with a Retry action, hidden when there is no error
#[component]
pub fn ErrorBanner(#[prop(into)] error: Signal<Option<FetchError>>, #[prop(into)] on_retry: Callback<()>) -> impl IntoView {
    move || {
        error.get().map(|err| {
            let hint = match err.kind {
                ErrorKind::Network => "Check your connection and try again.",
                ErrorKind::Server => "The service had a problem. Try again in a moment.",
                ErrorKind::Validation => "The request was rejected.",
            };
            view! {
                <div class="error-banner" role="alert">
                    <span class="error-message">{err.message.clone()}</span>
                    <span class="error-hint">{hint}</span>
                    <button class="retry-btn" on:click=move |_| on_retry.run(())>"Retry"</button>
                </div>
            }
        })
    }
}

#[component]
pub fn LoadingIndicator(#[prop(into)] loading: Signal<bool>) -> impl IntoView {
    view! {
        <Show when=move || loading.get()>
            <div class="loading-indicator">"Loading…"</div>
        </Show>
    }
}

/// "Load more" for append-paginated lists
#[component]
pub fn LoadMoreButton(
    #[prop(into)] has_more: Signal<bool>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] on_load: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || has_more.get()>
            <button
                class="load-more-btn"
                disabled=move || loading.get()
                on:click=move |_| on_load.run(())
            >
                {move || if loading.get() { "Loading…" } else { "Load more" }}
            </button>
        </Show>
    }
}

/// Previous/next pager for replace-paginated lists
#[component]
pub fn Pager(
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] has_more: Signal<bool>,
    #[prop(into)] loading: Signal<bool>,
    /// Total matching records when the server reports one
    #[prop(into)] total_pages: Signal<Option<u32>>,
    #[prop(into)] on_page: Callback<u32>,
) -> impl IntoView {
    let label = move || match total_pages.get() {
        Some(total) => format!("Page {} of {}", page.get(), total.max(1)),
        None => format!("Page {}", page.get()),
    };

    view! {
        <nav class="pager">
            <button
                class="pager-btn"
                disabled=move || loading.get() || page.get() <= 1
                on:click=move |_| on_page.run(page.get_untracked().saturating_sub(1).max(1))
            >
                "‹ Prev"
            </button>
            <span class="pager-label">{label}</span>
            <button
                class="pager-btn"
                disabled=move || loading.get() || !has_more.get()
                on:click=move |_| on_page.run(page.get_untracked() + 1)
            >
                "Next ›"
            </button>
        </nav>
    }
}

#[component]
pub fn StatTile(label: &'static str, #[prop(into)] value: Signal<String>) -> impl IntoView {
    view! {
        <div class="stat-tile">
            <span class="stat-label">{label}</span>
            <span class="stat-value">{move || value.get()}</span>
        </div>
    }
}

/// Page count for `total` records at `limit` per page
pub fn page_count(total: Option<u64>, limit: u32) -> Option<u32> {
    let limit = u64::from(limit.max(1));
    total.map(|t| u32::try_from(t.div_ceil(limit)).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(None, 10), None);
        assert_eq!(page_count(Some(0), 10), Some(0));
        assert_eq!(page_count(Some(10), 10), Some(1));
        assert_eq!(page_count(Some(11), 10), Some(2));
        assert_eq!(page_count(Some(5), 0), Some(5));
    }
}
