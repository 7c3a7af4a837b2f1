//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the MetaCow client and the social
//! backend (posts, users, follows, recent swaps). All DTOs use JSON serialization
//! via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::users`]**: User profiles, follow requests, error bodies
//!   - **[`dto::posts`]**: Feed posts and post/reaction requests
//!   - **[`dto::swaps`]**: Recent swaps that can be attached to a post
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Format wallet addresses for display
//!   - **[`utils::truncate_address`]**: Truncate addresses with ellipsis
//!
//! ## Wire Format
//!
//! The backend is a document store, so DTOs follow its conventions rather than
//! Rust's:
//! - Identifiers arrive as `_id`
//! - Field names are **camelCase** (`profileImage`, `createdAt`, `txHash`)
//! - Optional fields are omitted from JSON when `None`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shared::dto::posts::CreatePostRequest;
//! use shared::utils::truncate_address;
//!
//! let request = CreatePostRequest {
//!     wallet: "0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be".to_string(),
//!     content: "LP on TKA/TKB looks juicy".to_string(),
//! };
//!
//! let display = truncate_address(&request.wallet);
//! assert_eq!(display, "0x3f5c...f0be");
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;
