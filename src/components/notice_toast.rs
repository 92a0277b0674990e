//! Notice Toast Component
//!
//! Shows the latest mutation notice from the store until dismissed or
//! replaced.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::store::{store_clear_notice, store_expire_notice, store_notice, use_app_store};

const NOTICE_MS: u32 = 4000;

#[component]
pub fn NoticeToast() -> impl IntoView {
    let store = use_app_store();

    // Auto-dismiss, unless a newer notice replaced this one meanwhile
    Effect::new(move |_| {
        if let Some(shown) = store_notice(&store) {
            spawn_local(async move {
                TimeoutFuture::new(NOTICE_MS).await;
                store_expire_notice(&store, &shown);
            });
        }
    });

    move || {
        store_notice(&store).map(|message| {
            view! {
                <div class="notice-toast" role="status">
                    <span>{message}</span>
                    <button class="close-btn" on:click=move |_| store_clear_notice(&store)>"×"</button>
                </div>
            }
        })
    }
}
