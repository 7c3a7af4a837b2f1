//! # Swap Data Transfer Objects

use serde::{Deserialize, Serialize};

/// A swap recently executed by a wallet, as returned by `GET /swaps/recent`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentSwap {
    pub tx_hash: String,
    #[serde(default)]
    pub input_amount: serde_json::Value,
    #[serde(default)]
    pub input_token: String,
    #[serde(default)]
    pub output_amount: serde_json::Value,
    #[serde(default)]
    pub output_token: String,
}

impl RecentSwap {
    /// One-line description, e.g. `Swapped 1.5 TKA → 3 TKB`
    pub fn summary(&self) -> String {
        format!(
            "Swapped {} {} → {} {}",
            display_amount(&self.input_amount),
            self.input_token,
            display_amount(&self.output_amount),
            self.output_token
        )
    }
}

fn display_amount(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "?".to_string(),
        other => other.to_string(),
    }
}
