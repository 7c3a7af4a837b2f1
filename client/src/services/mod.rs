//! # Services Module
//!
//! Wallet session, on-chain reputation, social feed and faucet.
//!
//! ## Module Overview
//!
//! ```text
//! services/
//! ├── session.rs     - Wallet session manager (connect, disconnect, signer)
//! ├── reputation.rs  - Reputation aggregation across factory pairs
//! ├── feed.rs        - Feed loading, posting, reactions, follows, search
//! ├── faucet.rs      - Faucet cooldowns, claims, wallet token tracking
//! └── api/           - HTTP client for the social backend
//! ```
//!
//! ## Service Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        metacow CLI                           │
//! │                                                              │
//! │  ┌────────────────┐  ┌───────────────┐  ┌────────────────┐  │
//! │  │ WalletSession  │  │  FeedService  │  │  FaucetClient  │  │
//! │  │ Manager        │  │               │  │                │  │
//! │  └───────┬────────┘  └──┬─────────┬──┘  └───────┬────────┘  │
//! │          │              │         │             │           │
//! │          │      ┌───────▼──────┐  │             │           │
//! │          │      │ Reputation   │  │             │           │
//! │          │      │ Aggregator   │  │             │           │
//! │          │      └───────┬──────┘  │             │           │
//! └──────────┼──────────────┼─────────┼─────────────┼───────────┘
//!            │              │         │             │
//!            │ EIP-1193     │ eth_call│ HTTP/JSON   │ eth_call / eth_sendTransaction
//!            ▼              ▼         ▼             ▼
//!     ┌─────────────────────────┐  ┌──────────────────────┐
//!     │   Wallet provider       │  │   Social backend     │
//!     │   (factory, pairs,      │  │   /posts /users      │
//!     │    faucet contracts)    │  │   /follow /swaps     │
//!     └─────────────────────────┘  └──────────────────────┘
//! ```
//!
//! ## Ownership
//!
//! The session manager is the only writer of wallet state. Everything else
//! reads a snapshot or borrows a [`session::SignerHandle`], which stops working
//! once the session that issued it ends.
//!
//! The aggregator holds no state between scans and can be shared freely.

pub mod api;
pub mod faucet;
pub mod feed;
pub mod reputation;
pub mod session;

pub use api::ApiClient;
pub use faucet::FaucetClient;
pub use feed::FeedService;
pub use reputation::{ReputationAggregator, ReputationQuery};
pub use session::{ConnectionError, WalletSessionManager};
