//! Delete Confirm Button Component
//!
//! Two-step inline confirmation for destructive actions (deleting an
//! application, cancelling a withdrawal).

use leptos::prelude::*;

/// Inline confirmation button
///
/// Shows `label` first. Once clicked it turns into "`confirm_text`?" with
/// ✓/✗; only ✓ runs `on_confirm`, and either choice resets the button.
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] label: String,
    #[prop(into, default = "Delete".to_string())] confirm_text: String,
    #[prop(into, optional)] disabled: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (asking, set_asking) = signal(false);
    let question = format!("{}?", confirm_text);

    move || {
        if asking.get() {
            view! {
                <span class="delete-confirm">
                    <span class="delete-confirm-text">{question.clone()}</span>
                    <button
                        class="confirm-btn"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            set_asking.set(false);
                            on_confirm.run(());
                        }
                    >
                        "✓"
                    </button>
                    <button
                        class="cancel-btn"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            set_asking.set(false);
                        }
                    >
                        "✗"
                    </button>
                </span>
            }
            .into_any()
        } else {
            view! {
                <button
                    class="delete-btn"
                    disabled=move || disabled.get()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_asking.set(true);
                    }
                >
                    {label.clone()}
                </button>
            }
            .into_any()
        }
    }
}
