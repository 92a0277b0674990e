//! Application Board Component
//!
//! Admin queue of host and guide applications: status filter, counters,
//! approve/reject and delete. Rows are narrowed to what the signed-in admin
//! should see; the server still enforces who may read or change what.

use leptos::prelude::*;
use paged_collection::{MutationIntent, QueryPatch};

use super::{DeleteConfirmButton, ErrorBanner, LoadMoreButton, LoadingIndicator, StatTile};
use crate::api::ApplicationSource;
use crate::context::use_app_context;
use crate::models::{application_stats, ApplicationKind, ApplicationReview, ApplicationStatus, HostApplication};
use crate::paging::PagedSignal;
use crate::store::{store_notify, use_app_store};

const STATUS_FILTERS: &[(&str, &str)] = &[
    ("", "All"),
    ("pending", "Pending"),
    ("approved", "Approved"),
    ("rejected", "Rejected"),
];

#[component]
pub fn ApplicationBoard() -> impl IntoView {
    let ctx = use_app_context();
    let actor = StoredValue::new(ctx.actor.clone());

    let board = PagedSignal::new(
        ApplicationSource::new(ctx.api.clone()),
        ctx.page_query()
            .with_sort("-submittedAt")
            .with_filter("status", ApplicationStatus::Pending.as_str()),
    );
    board.refresh();

    let current_status = move || board.query().filters.get("status").map(|s| s.to_string()).unwrap_or_default();
    let rows = move || board.visible_items(&actor.get_value());

    // Counters describe the rows on screen, not the whole loaded page
    let counter = move |name: &'static str| {
        Signal::derive(move || board.visible_stats(&actor.get_value(), &application_stats()).value(name).to_string())
    };

    view! {
        <section class="application-board">
            <header class="board-toolbar">
                <h2>"Host & guide applications"</h2>
                <div class="status-filter">
                    {STATUS_FILTERS.iter().map(|(value, label)| {
                        let value = *value;
                        view! {
                            <button
                                class=move || if current_status() == value { "filter-btn active" } else { "filter-btn" }
                                on:click=move |_| board.set_query(QueryPatch::new().text_filter("status", value))
                            >
                                {*label}
                            </button>
                        }
                    }).collect_view()}
                </div>
            </header>

            <div class="stat-row">
                <StatTile label="Shown" value=counter("count") />
                <StatTile label="Pending" value=counter("pending") />
                <StatTile label="Approved" value=counter("approved") />
                <StatTile label="Guide applications" value=counter("guides") />
            </div>

            <LoadingIndicator loading=Signal::derive(move || board.is_loading()) />
            <ErrorBanner
                error=Signal::derive(move || board.error())
                on_retry=Callback::new(move |_| board.retry())
            />

            <table class="application-table">
                <thead>
                    <tr>
                        <th>"Applicant"</th>
                        <th>"Kind"</th>
                        <th>"City"</th>
                        <th>"Submitted"</th>
                        <th>"Status"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=rows
                        key=|a| (a.id.clone(), a.status)
                        children=move |application| view! { <ApplicationRow application=application board=board /> }
                    />
                </tbody>
            </table>

            <Show when=move || !board.is_loading() && board.error().is_none() && rows().is_empty()>
                <p class="empty-state">"Nothing to review here."</p>
            </Show>

            <LoadMoreButton
                has_more=Signal::derive(move || board.has_more())
                loading=Signal::derive(move || board.is_loading())
                on_load=Callback::new(move |_| board.load_more())
            />
        </section>
    }
}

#[component]
fn ApplicationRow(
    application: HostApplication,
    board: PagedSignal<HostApplication, ApplicationSource>,
) -> impl IntoView {
    let store = use_app_store();
    let (busy, set_busy) = signal(false);
    let id = StoredValue::new(application.id.clone());
    let name = StoredValue::new(application.applicant_name.clone());

    let decide = move |status: ApplicationStatus| {
        set_busy.set(true);
        let intent = MutationIntent::Update {
            id: id.get_value(),
            payload: ApplicationReview { status, note: None },
        };
        board.mutate(intent, move |result| {
            set_busy.try_set(false);
            let message = match result {
                Ok(()) => format!("{} {}", name.try_get_value().unwrap_or_default(), status.as_str()),
                Err(err) => format!("Could not update application: {}", err.message),
            };
            store_notify(&store, message);
        });
    };

    let remove = Callback::new(move |_| {
        set_busy.set(true);
        board.mutate(MutationIntent::Delete { id: id.get_value() }, move |result| {
            set_busy.try_set(false);
            if let Err(err) = result {
                store_notify(&store, format!("Could not delete application: {}", err.message));
            }
        });
    });

    let kind = match application.kind {
        ApplicationKind::Host => "Host",
        ApplicationKind::Guide => "Guide",
    };
    let is_pending = application.status == ApplicationStatus::Pending;
    let submitted = application.submitted_at.split('T').next().unwrap_or_default().to_string();

    view! {
        <tr class="application-row">
            <td>{application.applicant_name.clone()}</td>
            <td>{kind}</td>
            <td>{application.city.clone()}</td>
            <td>{submitted}</td>
            <td class=format!("status status-{}", application.status.as_str())>{application.status.as_str()}</td>
            <td class="row-actions">
                <Show when=move || is_pending>
                    <button disabled=move || busy.get() on:click=move |_| decide(ApplicationStatus::Approved)>
                        "Approve"
                    </button>
                    <button disabled=move || busy.get() on:click=move |_| decide(ApplicationStatus::Rejected)>
                        "Reject"
                    </button>
                </Show>
                <DeleteConfirmButton label="Delete" disabled=Signal::derive(move || busy.get()) on_confirm=remove />
            </td>
        </tr>
    }
}
