//! # Chain Access
//!
//! Everything that touches the EVM chain goes through the wallet provider.
//!
//! ```text
//! chain/
//! ├── provider.rs   - WalletProvider trait, HTTP JSON-RPC transport, typed helpers
//! ├── contracts.rs  - sol! interfaces, bundled pair ABI, token list
//! └── registry.rs   - PairRegistry trait and its eth_call implementation
//! ```

pub mod contracts;
#[cfg(test)]
pub(crate) mod mock;
pub mod provider;
pub mod registry;

pub use contracts::{find_token, PairInterface, Token, TOKEN_LIST};
pub use provider::{HttpWalletProvider, ProviderError, WalletProvider};
pub use registry::{OnChainRegistry, PairRegistry};
