//! Experience Catalogue Component
//!
//! Sortable, city-filtered grid of experiences with a page-number pager.
//! Selecting a card opens the detail panel next to the grid.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use paged_collection::QueryPatch;

use super::{ErrorBanner, ExperienceDetail, LoadingIndicator, Pager, StatTile};
use crate::api::ExperienceSource;
use crate::components::list_status::page_count;
use crate::context::use_app_context;
use crate::markdown::plain_excerpt;
use crate::models::{experience_stats, format_money, Experience, EXPERIENCE_SORTS};
use crate::paging::PagedSignal;
use crate::store::{store_select_experience, store_selected_experience, use_app_store};

const DEFAULT_SORT: &str = "-rating";
const EXCERPT_CHARS: usize = 140;

#[component]
pub fn ExperienceCatalogue() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let debounce_ms = ctx.config.search_debounce_ms;

    let catalogue = PagedSignal::new(
        ExperienceSource::new(ctx.api.clone()),
        ctx.page_query().with_sort(DEFAULT_SORT),
    );
    catalogue.refresh();

    let (city, set_city) = signal(String::new());
    // Bumped on every keystroke; only the last pending timer applies its filter
    let typing = StoredValue::new(0u32);

    let current_sort = move || catalogue.query().sort.unwrap_or_default();
    let avg_price = Signal::derive(move || {
        let stats = catalogue.stats(&experience_stats());
        if stats.value("count") == 0.0 {
            "–".to_string()
        } else {
            format_money(stats.value("avg_price"))
        }
    });
    // Only changes when the selected experience itself changes, so the
    // detail panel and its reviews are not rebuilt on every list update
    let selected = Memo::new(move |_| store_selected_experience(&store).and_then(|id| catalogue.find(&id)));
    let shown = Signal::derive(move || catalogue.items().len().to_string());
    let total_pages = Signal::derive(move || page_count(catalogue.total_count(), catalogue.query().limit));

    view! {
        <section class="catalogue">
            <header class="catalogue-toolbar">
                <input
                    type="search"
                    class="city-filter"
                    placeholder="Filter by city"
                    prop:value=move || city.get()
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        set_city.set(value.clone());
                        typing.update_value(|n| *n = n.wrapping_add(1));
                        let mine = typing.get_value();
                        spawn_local(async move {
                            TimeoutFuture::new(debounce_ms).await;
                            if typing.try_get_value() == Some(mine) {
                                catalogue.set_query(QueryPatch::new().text_filter("city", &value));
                            }
                        });
                    }
                />
                <select
                    class="sort-select"
                    on:change=move |ev| catalogue.set_query(QueryPatch::new().sort(event_target_value(&ev)))
                >
                    {EXPERIENCE_SORTS.iter().map(|(value, label)| {
                        let value = *value;
                        view! {
                            <option value=value selected=move || current_sort() == value>{*label}</option>
                        }
                    }).collect_view()}
                </select>
            </header>

            <div class="stat-row">
                <StatTile label="On this page" value=shown />
                <StatTile label="Average price" value=avg_price />
            </div>

            <LoadingIndicator loading=Signal::derive(move || catalogue.is_loading()) />
            <ErrorBanner
                error=Signal::derive(move || catalogue.error())
                on_retry=Callback::new(move |_| catalogue.retry())
            />

            <div class="catalogue-body">
                <ul class="experience-grid">
                    <For
                        each=move || catalogue.items()
                        key=|e| e.id.clone()
                        children=move |experience| view! { <ExperienceCard experience=experience /> }
                    />
                </ul>

                {move || selected.get().map(|experience| view! { <ExperienceDetail experience=experience /> })}
            </div>

            <Show when=move || !catalogue.is_loading() && catalogue.error().is_none() && catalogue.items().is_empty()>
                <p class="empty-state">"No experiences match these filters."</p>
            </Show>

            <Pager
                page=Signal::derive(move || catalogue.page())
                has_more=Signal::derive(move || catalogue.has_more())
                loading=Signal::derive(move || catalogue.is_loading())
                total_pages=total_pages
                on_page=Callback::new(move |page| catalogue.set_query(QueryPatch::new().page(page)))
            />
        </section>
    }
}

#[component]
fn ExperienceCard(experience: Experience) -> impl IntoView {
    let store = use_app_store();
    let id = experience.id.clone();
    let selected_id = id.clone();
    let is_selected = move || store_selected_experience(&store).as_deref() == Some(selected_id.as_str());
    let rating = experience.rating.map(|r| format!("★ {:.1}", r)).unwrap_or_else(|| "New".to_string());

    view! {
        <li
            class=move || if is_selected() { "experience-card selected" } else { "experience-card" }
            on:click=move |_| store_select_experience(&store, Some(id.clone()))
        >
            <h3 class="experience-title">{experience.title.clone()}</h3>
            <div class="experience-meta">
                <span class="experience-city">{experience.city.clone()}</span>
                <span class="experience-price">{format_money(experience.price)}</span>
                <span class="experience-rating">{rating}</span>
            </div>
            <p class="experience-excerpt">{plain_excerpt(&experience.description, EXCERPT_CHARS)}</p>
        </li>
    }
}
