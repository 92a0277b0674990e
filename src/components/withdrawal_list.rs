//! Withdrawal List Component
//!
//! The signed-in host's or guide's payout requests with running totals and
//! cancellation of requests not yet processed.

use leptos::prelude::*;
use paged_collection::MutationIntent;

use super::{DeleteConfirmButton, ErrorBanner, LoadMoreButton, LoadingIndicator, StatTile};
use crate::api::WithdrawalSource;
use crate::context::use_app_context;
use crate::models::{format_money, withdrawal_stats, Withdrawal, WithdrawalRequest};
use crate::paging::PagedSignal;
use crate::store::{store_notify, use_app_store};

#[component]
pub fn WithdrawalList() -> impl IntoView {
    let ctx = use_app_context();
    let actor = StoredValue::new(ctx.actor.clone());

    let wallet = PagedSignal::new(
        WithdrawalSource::new(ctx.api.clone()),
        ctx.page_query().with_sort("-requestedAt"),
    );
    wallet.refresh();

    let rows = move || wallet.visible_items(&actor.get_value());
    let total = move |name: &'static str| {
        Signal::derive(move || format_money(wallet.visible_stats(&actor.get_value(), &withdrawal_stats()).value(name)))
    };

    view! {
        <section class="withdrawal-list">
            <h2>"Withdrawals"</h2>
            <div class="stat-row">
                <StatTile label="Requested" value=total("requested") />
                <StatTile label="Fees" value=total("fees") />
                <StatTile label="Net" value=total("net") />
            </div>

            <WithdrawalForm wallet=wallet />

            <LoadingIndicator loading=Signal::derive(move || wallet.is_loading()) />
            <ErrorBanner
                error=Signal::derive(move || wallet.error())
                on_retry=Callback::new(move |_| wallet.retry())
            />

            <ul class="withdrawals">
                <For
                    each=rows
                    key=|w| (w.id.clone(), w.status)
                    children=move |withdrawal| view! { <WithdrawalRow withdrawal=withdrawal wallet=wallet /> }
                />
            </ul>

            <Show when=move || !wallet.is_loading() && wallet.error().is_none() && rows().is_empty()>
                <p class="empty-state">"No withdrawals yet."</p>
            </Show>

            <LoadMoreButton
                has_more=Signal::derive(move || wallet.has_more())
                loading=Signal::derive(move || wallet.is_loading())
                on_load=Callback::new(move |_| wallet.load_more())
            />
        </section>
    }
}

#[component]
fn WithdrawalRow(withdrawal: Withdrawal, wallet: PagedSignal<Withdrawal, WithdrawalSource>) -> impl IntoView {
    let store = use_app_store();
    let (busy, set_busy) = signal(false);
    let id = StoredValue::new(withdrawal.id.clone());

    let cancel = Callback::new(move |_| {
        set_busy.set(true);
        wallet.mutate(MutationIntent::Delete { id: id.get_value() }, move |result| {
            set_busy.try_set(false);
            let message = match result {
                Ok(()) => "Withdrawal cancelled.".to_string(),
                Err(err) => format!("Could not cancel withdrawal: {}", err.message),
            };
            store_notify(&store, message);
        });
    });

    let status = withdrawal.status.as_str();
    let cancellable = withdrawal.status.is_cancellable();
    let requested = withdrawal.requested_at.split('T').next().unwrap_or_default().to_string();

    view! {
        <li class="withdrawal-row">
            <span class="withdrawal-date">{requested}</span>
            <span class="withdrawal-amount">{format_money(withdrawal.amount)}</span>
            <span class="withdrawal-fee">{format!("fee {}", format_money(withdrawal.fee))}</span>
            <span class=format!("status status-{}", status)>{status}</span>
            <Show when=move || cancellable>
                <DeleteConfirmButton
                    label="Cancel request"
                    confirm_text="Cancel this withdrawal"
                    disabled=Signal::derive(move || busy.get())
                    on_confirm=cancel
                />
            </Show>
        </li>
    }
}

#[component]
fn WithdrawalForm(wallet: PagedSignal<Withdrawal, WithdrawalSource>) -> impl IntoView {
    let store = use_app_store();
    let (amount, set_amount) = signal(String::new());
    let (form_error, set_form_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let request = match parse_amount(&amount.get_untracked()) {
            Ok(value) => WithdrawalRequest { amount: value },
            Err(message) => {
                set_form_error.set(Some(message));
                return;
            }
        };
        set_form_error.set(None);
        set_submitting.set(true);
        wallet.mutate(MutationIntent::Create { payload: request }, move |result| {
            set_submitting.try_set(false);
            match result {
                Ok(()) => {
                    set_amount.try_set(String::new());
                    store_notify(&store, "Withdrawal requested.");
                }
                Err(err) => {
                    set_form_error.try_set(Some(err.message));
                }
            }
        });
    };

    view! {
        <form class="withdrawal-form" on:submit=submit>
            <input
                type="number"
                min="0"
                step="0.01"
                placeholder="Amount"
                prop:value=move || amount.get()
                on:input=move |ev| set_amount.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || submitting.get()>"Request withdrawal"</button>
            {move || form_error.get().map(|message| view! { <p class="form-error">{message}</p> })}
        </form>
    }
}

/// Positive amount with at most two decimals
fn parse_amount(input: &str) -> Result<f64, String> {
    let trimmed = input.trim();
    let value: f64 = trimmed.parse().map_err(|_| "Enter an amount".to_string())?;
    if !value.is_finite() || value <= 0.0 {
        return Err("Amount must be greater than zero".to_string());
    }
    if trimmed.split('.').nth(1).is_some_and(|decimals| decimals.len() > 2) {
        return Err("Use at most two decimals".to_string());
    }
    Ok(value)
}
