//! # Utility Functions
//!
//! Shared utility functions used across the client.
//!
//! ## Modules
//!
//! - **[`validation`]**: Input validation (post content, search queries, addresses)
//! - **[`format`]**: Display formatting (lowercase addresses, ether amounts, cooldowns)
//!
//! ## Related Modules
//!
//! - [`shared::utils`]: Cross-crate utilities (address truncation)
//! - [`crate::core`]: Core abstractions and error types

pub mod format;
pub mod validation;
