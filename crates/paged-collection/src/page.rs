//! Page Shapes
//!
//! `Page` is one response from the collection endpoint, `PageResult` is what
//! the view model currently holds for display.

use serde::{Deserialize, Deserializer};

use crate::query::QueryState;

/// One page as returned by the remote endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            total_count: None,
        }
    }

    pub fn with_total(items: Vec<T>, total: u64) -> Self {
        Self {
            items,
            total_count: Some(total),
        }
    }
}

// Accepted bodies: a bare array, or an object carrying the array under
// items/data/results and an optional total/totalCount/count.
#[derive(Deserialize)]
#[serde(untagged)]
enum WirePage<T> {
    Bare(Vec<T>),
    Envelope {
        #[serde(alias = "data", alias = "results")]
        items: Vec<T>,
        #[serde(default, alias = "totalCount", alias = "count")]
        total: Option<u64>,
    },
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Page<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match WirePage::deserialize(deserializer)? {
            WirePage::Bare(items) => Page::new(items),
            WirePage::Envelope { items, total } => Page {
                items,
                total_count: total,
            },
        })
    }
}

/// Items currently loaded for display plus pagination metadata
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    pub(crate) items: Vec<T>,
    pub(crate) total_count: Option<u64>,
    pub(crate) has_more: bool,
    /// Window the items were fetched for; `None` until a fetch applies
    pub(crate) loaded_query: Option<QueryState>,
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: None,
            has_more: false,
            loaded_query: None,
        }
    }
}

impl<T> PageResult<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    /// True when the most recent page came back full
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn loaded_query(&self) -> Option<&QueryState> {
        self.loaded_query.as_ref()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: String,
    }

    #[test]
    fn test_bare_array() {
        let page: Page<Row> = serde_json::from_str(r#"[{"id":"a"},{"id":"b"}]"#).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_count, None);
    }

    #[test]
    fn test_envelope_aliases() {
        let page: Page<Row> = serde_json::from_str(r#"{"items":[{"id":"a"}],"total":5}"#).unwrap();
        assert_eq!(page.total_count, Some(5));

        let page: Page<Row> = serde_json::from_str(r#"{"data":[{"id":"a"}],"totalCount":7}"#).unwrap();
        assert_eq!(page.items[0].id, "a");
        assert_eq!(page.total_count, Some(7));

        let page: Page<Row> = serde_json::from_str(r#"{"results":[]}"#).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, None);
    }

    #[test]
    fn test_malformed_body_is_rejected() {
        assert!(serde_json::from_str::<Page<Row>>(r#"{"rows":[]}"#).is_err());
        assert!(serde_json::from_str::<Page<Row>>(r#"[{"name":"no id"}]"#).is_err());
        assert!(serde_json::from_str::<Page<Row>>("null").is_err());
    }
}
