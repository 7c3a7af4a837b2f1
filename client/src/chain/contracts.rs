//! # Contract Interfaces
//!
//! Call encodings for the factory, pair and faucet contracts, the bundled pair
//! ABI used for the reputation capability check, and the deployed addresses of
//! the test tokens.

use alloy_json_abi::JsonAbi;
use alloy_primitives::{address, Address};
use alloy_sol_types::sol;
use serde::Deserialize;
use std::path::Path;

use crate::core::error::{AppError, Result};

sol! {
    /// Registry of trading pairs
    interface IFactory {
        function allPairsLength() external view returns (uint256);
        function allPairs(uint256 index) external view returns (address pair);
    }

    /// Trading pair, consumed only for its optional scoring hook
    interface IPair {
        function getReputationScore(address user) external view returns (uint256);
    }

    /// Test-token faucet with a per-user, per-token cooldown
    interface IFaucet {
        function claim(address token) external;
        function timeUntilNextClaim(address user, address token) external view returns (uint256);
    }
}

/// Default factory deployment
pub const FACTORY_ADDRESS: Address = address!("0x524fec22546b087e91d198745cdd6ea94c057d79");

/// Default faucet deployment
pub const FAUCET_ADDRESS: Address = address!("0xd1504b93610aaa68c1f93165120b7b2b906ae9a8");

/// Name of the scoring function looked up in the pair ABI
pub const REPUTATION_FUNCTION: &str = "getReputationScore";

const BUNDLED_PAIR_ABI: &str = include_str!("../../abis/Pair.json");

/// A token the faucet dispenses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub symbol: &'static str,
    pub address: Address,
    pub decimals: u8,
}

pub static TOKEN_LIST: [Token; 4] = [
    Token {
        symbol: "TKA",
        address: address!("0xd7c6cdfe1eb47fb74f2682f672b84c70a1891c93"),
        decimals: 18,
    },
    Token {
        symbol: "TKB",
        address: address!("0x23cb54c5083dcef3877a32409727ccb9afc4d333"),
        decimals: 18,
    },
    Token {
        symbol: "USDT",
        address: address!("0x35f7f94224ed0fe995f391cec8fa7dee64107bf1"),
        decimals: 18,
    },
    Token {
        symbol: "MOO",
        address: address!("0x26f9ec14564b73dc95a79898bce62656a9a5503d"),
        decimals: 18,
    },
];

/// Case-insensitive lookup in [`TOKEN_LIST`]
pub fn find_token(symbol: &str) -> Option<&'static Token> {
    TOKEN_LIST
        .iter()
        .find(|token| token.symbol.eq_ignore_ascii_case(symbol.trim()))
}

/// ABI files come either as a build artifact (`{ "abi": [...] }`) or a bare array
#[derive(Deserialize)]
#[serde(untagged)]
enum AbiDocument {
    Artifact { abi: JsonAbi },
    Bare(JsonAbi),
}

/// Parsed pair ABI.
///
/// The reputation capability is a property of this interface definition,
/// shared by every pair, and not of any deployed contract. It therefore
/// answers the same for all pairs scanned with it.
#[derive(Debug, Clone)]
pub struct PairInterface {
    abi: JsonAbi,
}

impl PairInterface {
    /// The ABI compiled into the binary
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_PAIR_ABI)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let doc: AbiDocument = serde_json::from_str(json)
            .map_err(|e| AppError::Config(format!("Invalid pair ABI: {}", e)))?;
        let abi = match doc {
            AbiDocument::Artifact { abi } => abi,
            AbiDocument::Bare(abi) => abi,
        };
        Ok(Self { abi })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read pair ABI {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Whether the ABI declares `getReputationScore`
    pub fn supports_reputation(&self) -> bool {
        self.abi.functions.contains_key(REPUTATION_FUNCTION)
    }
}
