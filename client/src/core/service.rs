//! # Service Traits
//!
//! Traits for dependency injection, so the feed logic can run against an
//! in-memory backend in tests.

use async_trait::async_trait;
use shared::dto::posts::{CreatePostRequest, Post, SwapPostRequest};
use shared::dto::swaps::RecentSwap;
use shared::dto::users::User;

use super::error::Result;

/// Social backend operations.
///
/// Implemented by [`crate::services::api::ApiClient`] over HTTP.
#[async_trait]
pub trait SocialApi: Send + Sync {
    /// Profile registered for a wallet
    async fn get_user_by_wallet(&self, wallet: &str) -> Result<User>;

    /// Every post in the feed, newest first as the backend orders them
    async fn get_posts(&self) -> Result<Vec<Post>>;

    /// Publish a plain post
    async fn create_post(&self, request: &CreatePostRequest) -> Result<()>;

    /// Publish a post describing one of the author's recent swaps
    async fn create_post_from_swap(&self, request: &SwapPostRequest) -> Result<()>;

    async fn like_post(&self, post_id: &str, wallet: &str) -> Result<()>;

    async fn dislike_post(&self, post_id: &str, wallet: &str) -> Result<()>;

    /// Users followed by `user_id`
    async fn get_following(&self, user_id: &str) -> Result<Vec<User>>;

    /// Make `follower_id` follow `target_id`
    async fn follow_user(&self, target_id: &str, follower_id: &str) -> Result<()>;

    async fn unfollow_user(&self, target_id: &str, follower_id: &str) -> Result<()>;

    async fn search_users(&self, query: &str) -> Result<Vec<User>>;

    /// Swaps the wallet made recently, attachable to a post
    async fn recent_swaps(&self, wallet: &str) -> Result<Vec<RecentSwap>>;
}
