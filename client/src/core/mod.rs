//! # Core Abstractions
//!
//! Core traits and error types shared by every layer of the client.
//!
//! ## Modules
//!
//! - **[`error`]**: Application error types (`AppError`, `Result<T>`)
//! - **[`service`]**: Service traits for dependency injection (`SocialApi`)
//!
//! ## Error Handling
//!
//! All application errors use the centralized [`AppError`] type:
//!
//! ```rust,no_run
//! use metacow_client::core::error::{AppError, Result};
//!
//! fn validate_input(input: &str) -> Result<String> {
//!     if input.is_empty() {
//!         return Err(AppError::Validation("Input cannot be empty".to_string()));
//!     }
//!     Ok(input.to_string())
//! }
//! ```
//!
//! ## Dependency Injection
//!
//! The feed service only sees the backend through [`SocialApi`]:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use metacow_client::core::service::SocialApi;
//!
//! // In production: the HTTP client
//! let api: Arc<dyn SocialApi> = Arc::new(metacow_client::services::api::ApiClient::default());
//!
//! // In tests: an in-memory backend
//! let api: Arc<dyn SocialApi> = Arc::new(MockSocialApi::default());
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::SocialApi;
