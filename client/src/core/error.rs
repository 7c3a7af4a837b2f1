//! # Common Error Types
//!
//! Consolidated error handling for the MetaCow client.
//!
//! This module provides a centralized error type [`AppError`]. Narrower error
//! types live next to the code that produces them and convert into it:
//!
//! - [`crate::chain::provider::ProviderError`] → `AppError::Chain`
//! - [`crate::services::session::ConnectionError`] → `AppError::Wallet`
//!
//! ## Error Categories
//!
//! - **Api**: Social backend communication errors (network, HTTP, JSON parsing)
//! - **Wallet**: Wallet session errors (no provider, rejected, not connected)
//! - **Chain**: Contract reads and transactions routed through the provider
//! - **Config**: Invalid or missing configuration
//! - **Validation**: Input validation errors (blank post, bad address)
//! - **State**: Local state inconsistencies
//!
//! ## Usage Pattern
//!
//! ```rust,no_run
//! use metacow_client::core::error::AppError;
//!
//! fn validate_content(content: &str) -> Result<&str, AppError> {
//!     if content.trim().is_empty() {
//!         return Err(AppError::Validation("Post content is empty".to_string()));
//!     }
//!     Ok(content)
//! }
//! ```

use thiserror::Error;

/// Application-wide error type.
///
/// Each variant carries a descriptive message; `thiserror` provides `Display`.
///
/// # Example
///
/// ```rust
/// use metacow_client::core::error::AppError;
///
/// let api_err = AppError::Api("Network error: connection refused".to_string());
/// let wallet_err = AppError::Wallet("No wallet provider available".to_string());
///
/// assert_eq!(api_err.to_string(), "API error: Network error: connection refused");
/// assert_eq!(wallet_err.to_string(), "Wallet error: No wallet provider available");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Social backend communication error.
    ///
    /// - Network failures (connection refused, timeout, DNS errors)
    /// - HTTP errors (4xx client errors, 5xx server errors)
    /// - JSON parsing errors (malformed responses)
    #[error("API error: {0}")]
    Api(String),

    /// Wallet session error.
    ///
    /// - No provider installed or configured
    /// - User rejected the authorization prompt
    /// - Operation needs a connected wallet but none is connected
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Contract call or transaction failure.
    #[error("Chain error: {0}")]
    Chain(String),

    /// Configuration error (bad URL, bad address, out-of-range value).
    #[error("Config error: {0}")]
    Config(String),

    /// Input validation error.
    ///
    /// ```rust
    /// use metacow_client::core::error::AppError;
    ///
    /// let err = AppError::Validation("Search query is empty".to_string());
    /// ```
    #[error("Validation error: {0}")]
    Validation(String),

    /// Local state error, e.g. following a user before the profile is loaded.
    #[error("State error: {0}")]
    State(String),
}

/// Convenience type alias for `Result<T, AppError>`.
///
/// ```rust
/// use metacow_client::core::error::Result;
///
/// fn operation() -> Result<String> {
///     Ok("success".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, AppError>;

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Api(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Api(msg.to_string())
    }
}

impl From<crate::chain::provider::ProviderError> for AppError {
    fn from(err: crate::chain::provider::ProviderError) -> Self {
        AppError::Chain(err.to_string())
    }
}

impl From<crate::services::session::ConnectionError> for AppError {
    fn from(err: crate::services::session::ConnectionError) -> Self {
        AppError::Wallet(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::provider::ProviderError;
    use crate::services::session::ConnectionError;

    #[test]
    fn test_string_converts_to_api_error() {
        let err: AppError = "Network error: refused".into();
        assert!(matches!(err, AppError::Api(_)));
    }

    #[test]
    fn test_narrow_errors_convert() {
        let err: AppError = ProviderError::Transport("timed out".to_string()).into();
        assert_eq!(err.to_string(), "Chain error: Transport error: timed out");

        let err: AppError = ConnectionError::ProviderUnavailable.into();
        assert!(matches!(err, AppError::Wallet(_)));
    }
}
