//! Review List Component
//!
//! Append-paginated reviews of one experience with an average rating and a
//! form for posting a new review.

use leptos::prelude::*;
use paged_collection::{dedup_by_id, MutationIntent, Role};

use super::{ErrorBanner, LoadMoreButton, LoadingIndicator, StatTile};
use crate::api::ReviewSource;
use crate::context::use_app_context;
use crate::models::{review_stats, Review, ReviewDraft};
use crate::paging::PagedSignal;
use crate::store::{store_notify, use_app_store};

#[component]
pub fn ReviewList(#[prop(into)] experience_id: String) -> impl IntoView {
    let ctx = use_app_context();
    let can_review = ctx.actor.role == Role::Guest && !ctx.actor.user_id.is_empty();

    let reviews = PagedSignal::new(
        ReviewSource::new(ctx.api.clone(), experience_id),
        ctx.page_query().with_sort("-createdAt"),
    );
    reviews.refresh();

    let avg_rating = Signal::derive(move || {
        let stats = reviews.stats(&review_stats());
        if stats.value("count") == 0.0 {
            "–".to_string()
        } else {
            format!("{:.1} / 5", stats.value("avg_rating"))
        }
    });
    let total = Signal::derive(move || match reviews.total_count() {
        Some(total) => total.to_string(),
        None => reviews.items().len().to_string(),
    });

    view! {
        <section class="review-list">
            <h3>"Reviews"</h3>
            <div class="stat-row">
                <StatTile label="Average rating" value=avg_rating />
                <StatTile label="Reviews" value=total />
            </div>

            <Show when=move || can_review>
                <ReviewForm reviews=reviews />
            </Show>

            <ul class="reviews">
                // Appended pages can repeat a review when new ones arrive meanwhile
                <For
                    each={move || dedup_by_id(&reviews.items()).into_iter().cloned().collect::<Vec<_>>()}
                    key=|r| r.id.clone()
                    children=move |review| view! { <ReviewRow review=review /> }
                />
            </ul>

            <LoadingIndicator loading=Signal::derive(move || reviews.is_loading()) />
            <ErrorBanner
                error=Signal::derive(move || reviews.error())
                on_retry=Callback::new(move |_| reviews.retry())
            />
            <LoadMoreButton
                has_more=Signal::derive(move || reviews.has_more())
                loading=Signal::derive(move || reviews.is_loading())
                on_load=Callback::new(move |_| reviews.load_more())
            />
        </section>
    }
}

#[component]
fn ReviewRow(review: Review) -> impl IntoView {
    let stars = "★".repeat(usize::from(review.rating.min(5)));
    let author = review.author_name.clone().unwrap_or_else(|| "Guest".to_string());
    let date = review.created_at.split('T').next().unwrap_or_default().to_string();

    view! {
        <li class="review-row">
            <div class="review-head">
                <span class="review-stars">{stars}</span>
                <span class="review-author">{author}</span>
                <span class="review-date">{date}</span>
            </div>
            <p class="review-comment">{review.comment.clone()}</p>
        </li>
    }
}

#[component]
fn ReviewForm(reviews: PagedSignal<Review, ReviewSource>) -> impl IntoView {
    let store = use_app_store();
    let (rating, set_rating) = signal(5u8);
    let (comment, set_comment) = signal(String::new());
    let (form_error, set_form_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let draft = ReviewDraft {
            rating: rating.get_untracked(),
            comment: comment.get_untracked().trim().to_string(),
        };
        if let Err(message) = draft.validate() {
            set_form_error.set(Some(message));
            return;
        }
        set_form_error.set(None);
        set_submitting.set(true);
        reviews.mutate(MutationIntent::Create { payload: draft }, move |result| {
            set_submitting.try_set(false);
            match result {
                Ok(()) => {
                    set_comment.try_set(String::new());
                    store_notify(&store, "Thanks, your review is posted.");
                }
                Err(err) => {
                    set_form_error.try_set(Some(err.message));
                }
            }
        });
    };

    view! {
        <form class="review-form" on:submit=submit>
            <div class="rating-picker">
                {(1u8..=5).map(|value| view! {
                    <button
                        type="button"
                        class={move || if rating.get() >= value { "star-btn active" } else { "star-btn" }}
                        on:click=move |_| set_rating.set(value)
                    >
                        "★"
                    </button>
                }).collect_view()}
            </div>
            <textarea
                placeholder="How was it?"
                prop:value=move || comment.get()
                on:input=move |ev| set_comment.set(event_target_value(&ev))
            ></textarea>
            {move || form_error.get().map(|message| view! { <p class="form-error">{message}</p> })}
            <button type="submit" disabled=move || submitting.get()>
                {move || if submitting.get() { "Posting…" } else { "Post review" }}
            </button>
        </form>
    }
}
