//! Review Endpoints
//!
//! Reviews are nested under one experience.

use async_trait::async_trait;
use paged_collection::{CollectionSource, FetchResult, Page, QueryState};

use super::{item_path, ApiClient, EXPERIENCES_PATH};
use crate::models::{Review, ReviewDraft};

#[derive(Debug, Clone)]
pub struct ReviewSource {
    client: ApiClient,
    experience_id: String,
}

impl ReviewSource {
    pub fn new(client: ApiClient, experience_id: impl Into<String>) -> Self {
        Self {
            client,
            experience_id: experience_id.into(),
        }
    }

    fn collection_path(&self) -> String {
        format!("{}/reviews", item_path(EXPERIENCES_PATH, &self.experience_id))
    }
}

#[async_trait(?Send)]
impl CollectionSource<Review> for ReviewSource {
    type Draft = ReviewDraft;

    async fn list(&self, query: &QueryState) -> FetchResult<Page<Review>> {
        self.client.get_page(&self.collection_path(), query).await
    }

    async fn create(&self, draft: &ReviewDraft) -> FetchResult<Review> {
        self.client.post(&self.collection_path(), draft).await
    }

    async fn delete(&self, id: &String) -> FetchResult<()> {
        self.client.delete(&item_path(&self.collection_path(), id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_path() {
        let source = ReviewSource::new(ApiClient::new("/api", None), "exp 1");
        assert_eq!(source.collection_path(), "experiences/exp%201/reviews");
    }
}
