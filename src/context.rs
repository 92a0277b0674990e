//! Application Context
//!
//! Read-only services provided via Leptos Context API: runtime config, the
//! current actor and the API client built for that actor.

use leptos::prelude::*;
use paged_collection::{ActorContext, QueryState};

use crate::api::ApiClient;
use crate::config::AppConfig;

/// App-wide read-only context
#[derive(Clone, Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub actor: ActorContext,
    pub api: ApiClient,
}

impl AppContext {
    pub fn new(config: AppConfig, actor: ActorContext) -> Self {
        let api = ApiClient::new(&config.api_base_url, actor.access_token.clone());
        Self { config, actor, api }
    }

    /// First-page query sized for list screens
    pub fn page_query(&self) -> QueryState {
        QueryState::new(self.config.page_size)
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;
    use paged_collection::Role;

    #[test]
    fn test_debug_output_carries_no_token() {
        let mut actor = ActorContext::new("admin-1", Role::Admin);
        actor.access_token = Some("session-token-123".to_string());
        let ctx = AppContext::new(AppConfig::default(), actor);

        let printed = format!("{:?}", ctx);
        assert!(printed.contains("admin-1"));
        assert!(!printed.contains("session-token-123"));
    }
}
