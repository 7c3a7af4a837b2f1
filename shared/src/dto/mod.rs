//! # Data Transfer Objects (DTOs)
//!
//! Data structures exchanged with the social backend over its REST API.
//!
//! ## Module Organization
//!
//! - [`users`] - User profiles, follow requests and error bodies
//! - [`posts`] - Feed posts, post creation and like/dislike requests
//! - [`swaps`] - Recent swaps offered as post attachments
//!
//! ## Serialization Format
//!
//! - **Field naming**: camelCase (`#[serde(rename_all = "camelCase")]`)
//! - **Identifiers**: `_id` on the wire, `id` in Rust
//! - **Optional fields**: Omitted when `None`
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/posts/652f0c.../like
//! Content-Type: application/json
//!
//! { "wallet": "0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be" }
//! ```

pub mod posts;
pub mod swaps;
pub mod users;

pub use posts::*;
pub use swaps::*;
pub use users::*;
