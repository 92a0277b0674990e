//! Runtime Configuration
//!
//! Read once at startup from an optional `window.__HEARTH_CONFIG__` object,
//! falling back to build-time environment values and defaults.

use paged_collection::ActorContext;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use wasm_bindgen::JsValue;

const CONFIG_GLOBAL: &str = "__HEARTH_CONFIG__";
const SESSION_GLOBAL: &str = "__HEARTH_SESSION__";
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Base URL of the marketplace REST API, without trailing slash
    pub api_base_url: String,
    /// Items per page on every list screen
    pub page_size: u32,
    /// Lines kept by the in-app log buffer
    pub log_capacity: usize,
    /// Delay before a typed filter triggers a refetch
    pub search_debounce_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("HEARTH_API_URL").unwrap_or("/api").to_string(),
            page_size: 12,
            log_capacity: 500,
            search_debounce_ms: 300,
        }
    }
}

impl AppConfig {
    /// Config from the page, or defaults when absent. Read errors are
    /// returned so they can be logged once the logger is running.
    pub fn load() -> Result<Self, String> {
        match read_global::<AppConfig>(CONFIG_GLOBAL) {
            Ok(Some(config)) => Ok(config.normalized()),
            Ok(None) => Ok(Self::default()),
            Err(e) => Err(format!("ignoring {}: {}", CONFIG_GLOBAL, e)),
        }
    }

    pub fn normalized(mut self) -> Self {
        self.page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);
        let trimmed = self.api_base_url.trim().trim_end_matches('/');
        self.api_base_url = if trimmed.is_empty() { "/api".to_string() } else { trimmed.to_string() };
        self
    }
}

/// Current actor as injected by the host page. Signing in happens outside
/// this app; without a session the visitor browses as an anonymous guest.
pub fn load_actor() -> ActorContext {
    match read_global::<ActorContext>(SESSION_GLOBAL) {
        Ok(Some(actor)) => actor,
        Ok(None) => ActorContext::default(),
        Err(e) => {
            log::warn!("ignoring {}: {}", SESSION_GLOBAL, e);
            ActorContext::default()
        }
    }
}

fn read_global<T: DeserializeOwned>(name: &str) -> Result<Option<T>, String> {
    let Some(window) = web_sys::window() else {
        return Ok(None);
    };
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(name)).map_err(|e| format!("{:?}", e))?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value).map(Some).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"pageSize": 30}"#).unwrap();
        assert_eq!(config.page_size, 30);
        assert_eq!(config.search_debounce_ms, 300);
        assert_eq!(config.log_capacity, 500);
    }

    #[test]
    fn test_normalized_clamps_and_trims() {
        let config = AppConfig {
            api_base_url: "https://api.example.com/v1/".to_string(),
            page_size: 1000,
            ..AppConfig::default()
        }
        .normalized();
        assert_eq!(config.api_base_url, "https://api.example.com/v1");
        assert_eq!(config.page_size, 100);

        let config = AppConfig {
            api_base_url: "  ".to_string(),
            page_size: 0,
            ..AppConfig::default()
        }
        .normalized();
        assert_eq!(config.api_base_url, "/api");
        assert_eq!(config.page_size, 1);
    }
}
