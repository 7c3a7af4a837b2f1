//! # API Client
//!
//! Main HTTP client for the social backend.

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::dto::posts::{CreatePostRequest, Post, SwapPostRequest};
use shared::dto::swaps::RecentSwap;
use shared::dto::users::{ErrorResponse, User};
use std::time::Duration;
use url::Url;

use crate::core::error::{AppError, Result};
use crate::core::service::SocialApi;

/// Base URL of the social backend when none is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the social backend.
///
/// Holds one connection pool; cheap to share behind an `Arc`.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `http://localhost:5000/api`).
    ///
    /// Every request is bounded by `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path starting with `/`
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Absolute URL for an endpoint whose path ends in caller-supplied segments.
    ///
    /// Each segment is percent-encoded, so an id containing `/` or `?` stays
    /// inside its own path segment.
    pub(crate) fn segment_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AppError::Config(format!("Invalid API URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("API URL cannot take a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) async fn send(request: RequestBuilder) -> Result<Response> {
        request
            .send()
            .await
            .map_err(|e| AppError::Api(format!("Network error: {}", e)))
    }

    /// Decode a successful response body, or turn an error status into `AppError::Api`.
    pub(crate) async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = Self::check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Api(format!("Failed to parse response: {}", e)))
    }

    /// Accept any 2xx, ignoring the body.
    pub(crate) async fn expect_success(response: Response) -> Result<()> {
        Self::check_status(response).await.map(|_| ())
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let reason = serde_json::from_str::<ErrorResponse>(&error_text)
            .ok()
            .and_then(|body| body.reason().map(str::to_string))
            .unwrap_or_else(|| {
                if error_text.trim().is_empty() {
                    format!("HTTP {}", status)
                } else {
                    error_text
                }
            });

        tracing::debug!(status = status.as_u16(), reason = %reason, "Backend request failed");
        Err(AppError::Api(reason))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_TIMEOUT)
    }
}

#[async_trait::async_trait]
impl SocialApi for ApiClient {
    async fn get_user_by_wallet(&self, wallet: &str) -> Result<User> {
        ApiClient::get_user_by_wallet(self, wallet).await
    }

    async fn get_posts(&self) -> Result<Vec<Post>> {
        ApiClient::get_posts(self).await
    }

    async fn create_post(&self, request: &CreatePostRequest) -> Result<()> {
        ApiClient::create_post(self, request).await
    }

    async fn create_post_from_swap(&self, request: &SwapPostRequest) -> Result<()> {
        ApiClient::create_post_from_swap(self, request).await
    }

    async fn like_post(&self, post_id: &str, wallet: &str) -> Result<()> {
        ApiClient::like_post(self, post_id, wallet).await
    }

    async fn dislike_post(&self, post_id: &str, wallet: &str) -> Result<()> {
        ApiClient::dislike_post(self, post_id, wallet).await
    }

    async fn get_following(&self, user_id: &str) -> Result<Vec<User>> {
        ApiClient::get_following(self, user_id).await
    }

    async fn follow_user(&self, target_id: &str, follower_id: &str) -> Result<()> {
        ApiClient::follow_user(self, target_id, follower_id).await
    }

    async fn unfollow_user(&self, target_id: &str, follower_id: &str) -> Result<()> {
        ApiClient::unfollow_user(self, target_id, follower_id).await
    }

    async fn search_users(&self, query: &str) -> Result<Vec<User>> {
        ApiClient::search_users(self, query).await
    }

    async fn recent_swaps(&self, wallet: &str) -> Result<Vec<RecentSwap>> {
        ApiClient::recent_swaps(self, wallet).await
    }
}
