//! # Post Data Transfer Objects
//!
//! Feed posts, post creation and reactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post in the alpha feed, optionally describing a swap
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub wallet: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub dislikes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_out: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_in: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_out: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

impl Post {
    /// True when both legs of a swap are attached.
    pub fn has_swap(&self) -> bool {
        self.token_in.is_some() && self.token_out.is_some()
    }

    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    pub fn dislike_count(&self) -> usize {
        self.dislikes.len()
    }
}

/// `GET /posts` answers either with a bare array or wrapped in `{ "posts": [...] }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PostsResponse {
    List(Vec<Post>),
    Wrapped {
        #[serde(default)]
        posts: Vec<Post>,
    },
}

impl PostsResponse {
    pub fn into_posts(self) -> Vec<Post> {
        match self {
            PostsResponse::List(posts) => posts,
            PostsResponse::Wrapped { posts } => posts,
        }
    }
}

/// Body of `POST /posts`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatePostRequest {
    pub wallet: String,
    pub content: String,
}

/// Body of `POST /posts/from-swap`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SwapPostRequest {
    pub wallet: String,
    pub content: String,
    pub tx_hash: String,
}

/// Body of like/dislike calls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReactionRequest {
    pub wallet: String,
}
