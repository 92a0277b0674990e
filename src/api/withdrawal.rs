//! Wallet Withdrawal Endpoints

use async_trait::async_trait;
use paged_collection::{CollectionSource, FetchResult, Page, QueryState};

use super::{item_path, ApiClient};
use crate::models::{Withdrawal, WithdrawalRequest};

const WITHDRAWALS_PATH: &str = "wallet/withdrawals";

#[derive(Debug, Clone)]
pub struct WithdrawalSource {
    client: ApiClient,
}

impl WithdrawalSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl CollectionSource<Withdrawal> for WithdrawalSource {
    type Draft = WithdrawalRequest;

    async fn list(&self, query: &QueryState) -> FetchResult<Page<Withdrawal>> {
        self.client.get_page(WITHDRAWALS_PATH, query).await
    }

    async fn create(&self, request: &WithdrawalRequest) -> FetchResult<Withdrawal> {
        self.client.post(WITHDRAWALS_PATH, request).await
    }

    /// Cancels a request that has not been paid out yet
    async fn delete(&self, id: &String) -> FetchResult<()> {
        self.client.delete(&item_path(WITHDRAWALS_PATH, id)).await
    }
}
