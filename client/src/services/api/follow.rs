//! # Follow API Client
//!
//! Follow graph reads and mutations. Mutations name the follower in the body
//! and the followed user in the path.

use super::client::ApiClient;
use crate::core::error::Result;
use shared::dto::users::{FollowRequest, User};

impl ApiClient {
    /// Users followed by `user_id`
    pub async fn get_following(&self, user_id: &str) -> Result<Vec<User>> {
        let url = self.segment_url(&["follow", "following", user_id])?;
        let response = ApiClient::send(self.client.get(url)).await?;
        ApiClient::parse_json(response).await
    }

    pub async fn follow_user(&self, target_id: &str, follower_id: &str) -> Result<()> {
        let url = self.segment_url(&["follow", "follow", target_id])?;
        let request = FollowRequest {
            follower_id: follower_id.to_string(),
        };
        let response = ApiClient::send(self.client.post(url).json(&request)).await?;
        ApiClient::expect_success(response).await
    }

    pub async fn unfollow_user(&self, target_id: &str, follower_id: &str) -> Result<()> {
        let url = self.segment_url(&["follow", "unfollow", target_id])?;
        let request = FollowRequest {
            follower_id: follower_id.to_string(),
        };
        let response = ApiClient::send(self.client.delete(url).json(&request)).await?;
        ApiClient::expect_success(response).await
    }
}
