//! # Posts API Client
//!
//! Feed listing, post creation and reactions.

use super::client::ApiClient;
use crate::core::error::Result;
use shared::dto::posts::*;

impl ApiClient {
    /// Fetch the whole feed
    pub async fn get_posts(&self) -> Result<Vec<Post>> {
        let url = self.url("/posts");
        let response = ApiClient::send(self.client.get(&url)).await?;
        let body: PostsResponse = ApiClient::parse_json(response).await?;
        Ok(body.into_posts())
    }

    /// Publish a plain post
    pub async fn create_post(&self, request: &CreatePostRequest) -> Result<()> {
        let url = self.url("/posts");
        let response = ApiClient::send(self.client.post(&url).json(request)).await?;
        ApiClient::expect_success(response).await
    }

    /// Publish a post that describes one of the author's swaps
    pub async fn create_post_from_swap(&self, request: &SwapPostRequest) -> Result<()> {
        let url = self.url("/posts/from-swap");
        let response = ApiClient::send(self.client.post(&url).json(request)).await?;
        ApiClient::expect_success(response).await
    }

    pub async fn like_post(&self, post_id: &str, wallet: &str) -> Result<()> {
        self.react(post_id, "like", wallet).await
    }

    pub async fn dislike_post(&self, post_id: &str, wallet: &str) -> Result<()> {
        self.react(post_id, "dislike", wallet).await
    }

    async fn react(&self, post_id: &str, reaction: &str, wallet: &str) -> Result<()> {
        let url = self.segment_url(&["posts", post_id, reaction])?;
        let request = ReactionRequest {
            wallet: wallet.to_string(),
        };
        let response = ApiClient::send(self.client.post(url).json(&request)).await?;
        ApiClient::expect_success(response).await
    }
}
