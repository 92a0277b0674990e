//! Navigation Bar Component
//!
//! Brand, role-dependent screen tabs and the signed-in actor.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{store_screen, store_set_screen, use_app_store, Screen};

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let screens = Screen::available_for(ctx.actor.role);

    let who = if ctx.actor.user_id.is_empty() {
        "Browsing as guest".to_string()
    } else {
        format!("{} · {}", ctx.actor.user_id, ctx.actor.role.label())
    };

    view! {
        <nav class="nav-bar">
            <span class="brand">"Hearth"</span>
            <div class="nav-tabs">
                {screens.into_iter().map(|screen| {
                    let is_active = move || store_screen(&store) == screen;
                    view! {
                        <button
                            class=move || if is_active() { "nav-tab active" } else { "nav-tab" }
                            on:click=move |_| store_set_screen(&store, screen)
                        >
                            {screen.label()}
                        </button>
                    }
                }).collect_view()}
            </div>
            <span class="nav-actor">{who}</span>
        </nav>
    }
}
