//! Experience Endpoints
//!
//! Catalogue listing. Hosts manage their experiences elsewhere, so this
//! source is read-only and mutations fail as unsupported.

use async_trait::async_trait;
use paged_collection::{CollectionSource, FetchResult, Page, QueryState};

use super::ApiClient;
use crate::models::Experience;

pub const EXPERIENCES_PATH: &str = "experiences";

#[derive(Debug, Clone)]
pub struct ExperienceSource {
    client: ApiClient,
}

impl ExperienceSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl CollectionSource<Experience> for ExperienceSource {
    type Draft = ();

    async fn list(&self, query: &QueryState) -> FetchResult<Page<Experience>> {
        self.client.get_page(EXPERIENCES_PATH, query).await
    }
}
