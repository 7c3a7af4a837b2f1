//! # Backend API Client Module
//!
//! HTTP client for the social backend: posts, reactions, users, follows and
//! recent swaps.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs      - Module exports and documentation
//! ├── client.rs   - ApiClient struct, response handling, SocialApi impl
//! ├── posts.rs    - Feed, post creation, likes and dislikes
//! ├── users.rs    - Profile lookup by wallet, user search
//! ├── follow.rs   - Following list, follow, unfollow
//! └── swaps.rs    - Recent swaps of a wallet
//! ```
//!
//! ## Errors
//!
//! Every call returns [`crate::core::error::AppError::Api`] on failure, with
//! a message of the form `Network error: …`, `Failed to parse response: …`, or
//! the backend's own error text.

pub mod client;
pub mod follow;
pub mod posts;
pub mod swaps;
pub mod users;

pub use client::{ApiClient, DEFAULT_API_URL};
