//! Hearth Frontend App
//!
//! Provides the shared context and store, then renders the navigation and
//! the active screen. Each screen owns its own paged collection, so leaving
//! a screen drops its state and coming back loads it fresh.

use leptos::prelude::*;
use paged_collection::ActorContext;
use reactive_stores::Store;

use crate::components::{ApplicationBoard, ExperienceCatalogue, LogPanel, NavBar, NoticeToast, WithdrawalList};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::store::{store_screen, AppState, Screen};

#[component]
pub fn App(config: AppConfig, actor: ActorContext) -> impl IntoView {
    log::info!(
        "[APP] starting: api={} page_size={} role={:?}",
        config.api_base_url,
        config.page_size,
        actor.role
    );

    let store = Store::new(AppState::default());
    provide_context(AppContext::new(config, actor));
    provide_context(store);

    view! {
        <div class="app-layout">
            <NavBar />
            <NoticeToast />
            <main class="main-content">
                {move || match store_screen(&store) {
                    Screen::Experiences => view! { <ExperienceCatalogue /> }.into_any(),
                    Screen::Applications => view! { <ApplicationBoard /> }.into_any(),
                    Screen::Wallet => view! { <WithdrawalList /> }.into_any(),
                    Screen::Diagnostics => view! { <LogPanel /> }.into_any(),
                }}
            </main>
        </div>
    }
}
