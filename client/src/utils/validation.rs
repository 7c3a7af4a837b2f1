//! Validation utilities for user input

use alloy_primitives::Address;
use std::str::FromStr;

use crate::core::error::AppError;

pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }

    /// Convert into a `Result`, mapping failures to `AppError::Validation`.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(AppError::Validation(
                self.error.unwrap_or_else(|| "Invalid input".to_string()),
            ))
        }
    }
}

/// Validate post content
pub fn validate_post_content(content: &str) -> ValidationResult {
    if content.trim().is_empty() {
        return ValidationResult::err("Post content is required");
    }

    ValidationResult::ok()
}

/// Validate a user search query
pub fn validate_search_query(query: &str) -> ValidationResult {
    if query.trim().is_empty() {
        return ValidationResult::err("Search query is required");
    }

    ValidationResult::ok()
}

/// Validate an EVM address (`0x` + 40 hex digits)
pub fn validate_address(address: &str) -> ValidationResult {
    let address = address.trim();
    if address.is_empty() {
        return ValidationResult::err("Address is required");
    }

    if !address.starts_with("0x") && !address.starts_with("0X") {
        return ValidationResult::err("Address must start with 0x");
    }

    if address.len() != 42 {
        return ValidationResult::err("Address must be 40 hex characters after 0x");
    }

    if !address[2..].chars().all(|c| c.is_ascii_hexdigit()) {
        return ValidationResult::err("Address contains non-hex characters");
    }

    ValidationResult::ok()
}

/// Validate and parse an address
pub fn parse_address(address: &str) -> Result<Address, AppError> {
    validate_address(address).into_result()?;
    Address::from_str(address.trim()).map_err(|e| AppError::Validation(format!("Invalid address: {}", e)))
}
