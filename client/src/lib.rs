//! # MetaCow Client - Library Root
//!
//! Client core for the MetaCow DEX: wallet session, on-chain reputation,
//! the social "alpha feed" and the test-token faucet. The `metacow` binary
//! (`main.rs`) is a thin command-line shell over this crate.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              metacow-client (this crate)               │
//! ├────────────────────────────────────────────────────────┤
//! │  alloy         - ABI encoding, addresses, U256         │
//! │  Tokio         - Async runtime                         │
//! │  Reqwest       - JSON-RPC and REST transport           │
//! │  tracing       - Structured logging                    │
//! └────────────────────────────────────────────────────────┘
//!          │                              │
//!          │ HTTP/JSON                    │ EIP-1193 JSON-RPC
//!          ▼                              ▼
//! ┌─────────────────┐          ┌─────────────────────────┐
//! │ Social backend  │          │  Wallet provider        │
//! │ (posts, users,  │          │  (factory, pairs,       │
//! │  follows)       │          │   faucet contracts)     │
//! └─────────────────┘          └─────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **chain**: Wallet provider trait and transport, contract encodings,
//!   pair registry
//! - **services**: Session manager, reputation aggregator, feed, faucet,
//!   backend API client
//! - **core**: `AppError` and the `SocialApi` service trait
//! - **config**: Environment-driven [`ClientConfig`]
//! - **logging**: `tracing` subscriber setup
//! - **utils**: Validation and display formatting
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use metacow_client::{ClientConfig, WalletSessionManager};
//!
//! # async fn run() -> metacow_client::core::Result<()> {
//! let config = ClientConfig::from_env()?;
//! config.validate()?;
//!
//! let session = WalletSessionManager::new(Arc::new(config.provider_source()));
//! let info = session.connect().await?;
//! println!("{} on chain {}", info.address, info.chain_id);
//! # Ok(())
//! # }
//! ```

pub mod chain;
pub mod config;
pub mod core;
pub mod logging;
pub mod services;
pub mod utils;

pub use config::ClientConfig;
pub use services::{
    ApiClient, ConnectionError, FaucetClient, FeedService, ReputationAggregator, ReputationQuery,
    WalletSessionManager,
};
