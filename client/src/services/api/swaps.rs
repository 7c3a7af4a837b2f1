//! # Swaps API Client

use super::client::ApiClient;
use crate::core::error::Result;
use shared::dto::swaps::RecentSwap;

impl ApiClient {
    /// Swaps recently executed by `wallet`
    pub async fn recent_swaps(&self, wallet: &str) -> Result<Vec<RecentSwap>> {
        let url = self.url("/swaps/recent");
        let response = ApiClient::send(self.client.get(&url).query(&[("user", wallet)])).await?;
        let swaps: Option<Vec<RecentSwap>> = ApiClient::parse_json(response).await?;
        Ok(swaps.unwrap_or_default())
    }
}
