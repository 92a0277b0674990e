//! Query State
//!
//! Page/limit/sort/filter parameters driving the next fetch.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Page size used when a screen does not pick one
pub const DEFAULT_LIMIT: u32 = 20;

/// Filter value sent as a query parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(value.into())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// Current request window.
///
/// `page` is 1-based; `page` and `limit` together give the offset window
/// `(page - 1) * limit .. page * limit`. Filters live in a sorted map so two
/// equal states always serialize to the same parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub page: u32,
    pub limit: u32,
    pub sort: Option<String>,
    pub filters: BTreeMap<String, Scalar>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl QueryState {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            sort: None,
            filters: BTreeMap::new(),
        }
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Zero-based index of the first item in this window
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// The same window shifted one page forward
    pub fn next_page(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..self.clone()
        }
    }

    /// Serialize as query parameters: `page`, `limit`, `sort` (if set), then
    /// every filter key in sorted order.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(3 + self.filters.len());
        params.push(("page".to_string(), self.page.to_string()));
        params.push(("limit".to_string(), self.limit.to_string()));
        if let Some(sort) = &self.sort {
            params.push(("sort".to_string(), sort.clone()));
        }
        for (key, value) in &self.filters {
            params.push((key.clone(), value.to_string()));
        }
        params
    }

    /// Merge a partial update. Returns true if anything changed.
    ///
    /// When the patch does not name a page and the limit, sort or any filter
    /// changed, the page snaps back to 1.
    pub fn apply(&mut self, patch: QueryPatch) -> bool {
        let mut window_changed = false;

        if let Some(limit) = patch.limit {
            let limit = limit.max(1);
            if limit != self.limit {
                self.limit = limit;
                window_changed = true;
            }
        }

        if let Some(sort) = patch.sort {
            if sort != self.sort {
                self.sort = sort;
                window_changed = true;
            }
        }

        for (key, value) in patch.filters {
            match value {
                Some(value) => {
                    if self.filters.get(&key) != Some(&value) {
                        self.filters.insert(key, value);
                        window_changed = true;
                    }
                }
                None => {
                    if self.filters.remove(&key).is_some() {
                        window_changed = true;
                    }
                }
            }
        }

        let previous_page = self.page;
        match patch.page {
            Some(page) => self.page = page.max(1),
            None if window_changed => self.page = 1,
            None => {}
        }

        window_changed || self.page != previous_page
    }
}

/// Partial update for [`QueryState`].
///
/// Filters merge per key; a `None` value removes that key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryPatch {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort: Option<Option<String>>,
    pub filters: BTreeMap<String, Option<Scalar>>,
}

impl QueryPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(Some(sort.into()));
        self
    }

    pub fn clear_sort(mut self) -> Self {
        self.sort = Some(None);
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.filters.insert(key.into(), Some(value.into()));
        self
    }

    pub fn remove_filter(mut self, key: impl Into<String>) -> Self {
        self.filters.insert(key.into(), None);
        self
    }

    /// Set the filter when `value` is non-blank, remove it otherwise.
    /// Text inputs feed this directly.
    pub fn text_filter(self, key: impl Into<String>, value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.remove_filter(key)
        } else {
            self.filter(key, trimmed)
        }
    }
}
