//! HTTP Client
//!
//! Thin fetch wrapper shared by every resource: URL building, bearer auth,
//! status classification and body parsing. Uses the browser's fetch on
//! wasm32 through reqwest.

use paged_collection::{FetchError, FetchResult, Page, QueryState};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET one page of a collection with the query as URL parameters
    pub async fn get_page<T: DeserializeOwned>(&self, path: &str, query: &QueryState) -> FetchResult<Page<T>> {
        let request = self.request(Method::GET, path).query(&query.to_params());
        let body = self.send(request).await?;
        parse_body(&body)
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, payload: &B) -> FetchResult<T> {
        let body = self.send(self.request(Method::POST, path).json(payload)).await?;
        parse_item(&body)
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, payload: &B) -> FetchResult<T> {
        let body = self.send(self.request(Method::PATCH, path).json(payload)).await?;
        parse_item(&body)
    }

    /// DELETE; any 2xx counts as done, the body is ignored
    pub async fn delete(&self, path: &str) -> FetchResult<()> {
        self.send(self.request(Method::DELETE, path)).await.map(|_| ())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self
            .http
            .request(method, self.url(path))
            .header(ACCEPT, "application/json");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> FetchResult<String> {
        let response = request.send().await.map_err(|e| FetchError::network(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| FetchError::network(e.to_string()))?;
        if status.is_success() {
            Ok(body)
        } else {
            let message = error_message(status.canonical_reason().unwrap_or("request failed"), &body);
            log::warn!("[API] HTTP {}: {}", status.as_u16(), message);
            Err(FetchError::from_status(status.as_u16(), message))
        }
    }
}

/// Path of one item under a collection, id percent-encoded
pub fn item_path(collection: &str, id: &str) -> String {
    format!(
        "{}/{}",
        collection.trim_end_matches('/'),
        utf8_percent_encode(id, NON_ALPHANUMERIC)
    )
}

/// Parse a successful body; a shape mismatch is the server's fault
pub fn parse_body<T: DeserializeOwned>(body: &str) -> FetchResult<T> {
    serde_json::from_str(body).map_err(|e| FetchError::server(format!("malformed response: {}", e)))
}

// Single-item bodies come bare or wrapped as {"data": ...} / {"item": ...}
#[derive(Deserialize)]
#[serde(untagged)]
enum WireItem<T> {
    Wrapped {
        #[serde(alias = "item")]
        data: T,
    },
    Bare(T),
}

pub fn parse_item<T: DeserializeOwned>(body: &str) -> FetchResult<T> {
    parse_body::<WireItem<T>>(body).map(|wire| match wire {
        WireItem::Wrapped { data } => data,
        WireItem::Bare(item) => item,
    })
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default, alias = "error")]
    message: Option<String>,
}

/// Server-provided message when the body carries one, else the status text
fn error_message(reason: &str, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use paged_collection::ErrorKind;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Thing {
        id: String,
    }

    #[test]
    fn test_url_joining() {
        let client = ApiClient::new("https://api.example.com/v1/", None);
        assert_eq!(client.url("/experiences"), "https://api.example.com/v1/experiences");
        assert_eq!(client.url("wallet/withdrawals"), "https://api.example.com/v1/wallet/withdrawals");
    }

    #[test]
    fn test_debug_hides_bearer_token() {
        let client = ApiClient::new("https://api.example.com", Some("bearer-secret".to_string()));
        let printed = format!("{:?}", client);
        assert!(printed.contains("https://api.example.com"));
        assert!(!printed.contains("bearer-secret"));
    }

    #[test]
    fn test_item_path_encodes_id() {
        assert_eq!(item_path("experiences", "abc"), "experiences/abc");
        assert_eq!(item_path("experiences/", "a/b c"), "experiences/a%2Fb%20c");
    }

    #[test]
    fn test_error_message_prefers_body() {
        assert_eq!(error_message("Bad Request", r#"{"message":"limit too large"}"#), "limit too large");
        assert_eq!(error_message("Forbidden", r#"{"error":"not your listing"}"#), "not your listing");
        assert_eq!(error_message("Bad Gateway", "<html>upstream</html>"), "Bad Gateway");
        assert_eq!(error_message("Conflict", r#"{"message":"  "}"#), "Conflict");
    }

    #[test]
    fn test_malformed_body_is_server_error() {
        let err = parse_body::<Page<Thing>>(r#"{"rows":[]}"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Server);
        assert!(err.message.starts_with("malformed response"));
    }

    #[test]
    fn test_parse_item_shapes() {
        assert_eq!(parse_item::<Thing>(r#"{"id":"a"}"#).unwrap().id, "a");
        assert_eq!(parse_item::<Thing>(r#"{"data":{"id":"b"}}"#).unwrap().id, "b");
        assert_eq!(parse_item::<Thing>(r#"{"item":{"id":"c"}}"#).unwrap().id, "c");
        assert!(parse_item::<Thing>("").is_err());
    }
}
