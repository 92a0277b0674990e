//! Experience Detail Component
//!
//! Rendered description of the selected experience and its reviews.

use leptos::prelude::*;

use super::ReviewList;
use crate::markdown::render_description;
use crate::models::{format_money, Experience};
use crate::store::{store_select_experience, use_app_store};

#[component]
pub fn ExperienceDetail(experience: Experience) -> impl IntoView {
    let store = use_app_store();
    let description_html = render_description(&experience.description);
    let rating = experience
        .rating
        .map(|r| format!("★ {:.1}", r))
        .unwrap_or_else(|| "No ratings yet".to_string());

    view! {
        <aside class="experience-detail">
            <header class="detail-header">
                <h2>{experience.title.clone()}</h2>
                <button class="close-btn" on:click=move |_| store_select_experience(&store, None)>"×"</button>
            </header>
            <div class="detail-meta">
                <span>{experience.city.clone()}</span>
                <span>{format_money(experience.price)}</span>
                <span>{rating}</span>
            </div>
            <div class="markdown-body" inner_html=description_html></div>
            <ReviewList experience_id=experience.id.clone() />
        </aside>
    }
}
