//! Host / Guide Application Endpoints
//!
//! Admin review queue. Applications are submitted elsewhere; this client
//! only decides on them and removes withdrawn ones.

use async_trait::async_trait;
use paged_collection::{CollectionSource, FetchResult, Page, QueryState};

use super::{item_path, ApiClient};
use crate::models::{ApplicationReview, HostApplication};

const APPLICATIONS_PATH: &str = "admin/applications";

#[derive(Debug, Clone)]
pub struct ApplicationSource {
    client: ApiClient,
}

impl ApplicationSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl CollectionSource<HostApplication> for ApplicationSource {
    type Draft = ApplicationReview;

    async fn list(&self, query: &QueryState) -> FetchResult<Page<HostApplication>> {
        self.client.get_page(APPLICATIONS_PATH, query).await
    }

    async fn update(&self, id: &String, review: &ApplicationReview) -> FetchResult<HostApplication> {
        self.client.patch(&item_path(APPLICATIONS_PATH, id), review).await
    }

    async fn delete(&self, id: &String) -> FetchResult<()> {
        self.client.delete(&item_path(APPLICATIONS_PATH, id)).await
    }
}
