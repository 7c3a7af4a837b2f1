//! # Shared Utility Functions
//!
//! Common utility functions used by the client library and its CLI.
//!
//! ## Address Formatting
//!
//! Functions for formatting EVM wallet addresses for display:
//! - [`format_address`] - Format address with ellipsis (first N and last M characters)
//! - [`truncate_address`] - `0x` prefix plus four hex digits, then the last four
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! let address = "0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be";
//! let formatted = format_address(address, 6, 4);
//! assert_eq!(formatted, "0x3f5c...f0be");
//! ```

/// Format a wallet address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned as-is.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be";
/// assert_eq!(format_address(addr, 6, 4), "0x3f5c...f0be");
/// assert_eq!(format_address(addr, 4, 4), "0x3f...f0be");
/// assert_eq!(format_address("short", 4, 4), "short");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    // Also guards against individual lengths exceeding the address length
    if address_len <= prefix_len + suffix_len
        || prefix_len >= address_len
        || suffix_len >= address_len
        || !address.is_ascii()
    {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Format a wallet address the way the feed shows authors: first six
/// characters (including `0x`) and last four.
///
/// # Examples
///
/// ```rust
/// use shared::utils::truncate_address;
///
/// let addr = "0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be";
/// assert_eq!(truncate_address(addr), "0x3f5c...f0be");
/// ```
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}
