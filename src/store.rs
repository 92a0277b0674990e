//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. List data is not
//! kept here: each screen owns its own paged collection.

use leptos::prelude::*;
use paged_collection::Role;
use reactive_stores::Store;

/// Top-level screens
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Experiences,
    Applications,
    Wallet,
    Diagnostics,
}

impl Screen {
    pub fn label(self) -> &'static str {
        match self {
            Screen::Experiences => "Experiences",
            Screen::Applications => "Applications",
            Screen::Wallet => "Wallet",
            Screen::Diagnostics => "Diagnostics",
        }
    }

    /// Screens offered in the navigation for a role. Hiding a tab is a
    /// convenience; the API still decides what each caller may load.
    pub fn available_for(role: Role) -> Vec<Screen> {
        let mut screens = vec![Screen::Experiences];
        if role.is_admin() {
            screens.push(Screen::Applications);
        }
        if matches!(role, Role::Host | Role::Guide) {
            screens.push(Screen::Wallet);
        }
        screens.push(Screen::Diagnostics);
        screens
    }
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Screen currently shown
    pub screen: Screen,
    /// Experience opened in the detail panel
    pub selected_experience: Option<String>,
    /// Transient message after a mutation (success or failure)
    pub notice: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_screen(store: &AppStore) -> Screen {
    store.screen().get()
}

pub fn store_set_screen(store: &AppStore, screen: Screen) {
    store.screen().set(screen);
    store.selected_experience().set(None);
}

pub fn store_selected_experience(store: &AppStore) -> Option<String> {
    store.selected_experience().get()
}

pub fn store_select_experience(store: &AppStore, id: Option<String>) {
    store.selected_experience().set(id);
}

pub fn store_notice(store: &AppStore) -> Option<String> {
    store.notice().get()
}

pub fn store_notify(store: &AppStore, message: impl Into<String>) {
    store.notice().set(Some(message.into()));
}

pub fn store_clear_notice(store: &AppStore) {
    store.notice().set(None);
}

/// Clear the notice only if it is still `message`
pub fn store_expire_notice(store: &AppStore, message: &str) {
    let current = store.notice().try_get_untracked().flatten();
    if current.as_deref() == Some(message) {
        store.notice().set(None);
    }
}
