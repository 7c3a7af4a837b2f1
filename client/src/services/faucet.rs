//! # Token Faucet
//!
//! Cooldown lookups and claims against the test-token faucet, plus asking the
//! wallet to track a claimed token.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{SolCall, SolValue};
use std::time::Duration;
use tracing::{debug, info};

use crate::chain::contracts::{IFaucet, Token, FAUCET_ADDRESS};
use crate::chain::provider::{self, ProviderError, WalletProvider, WatchAssetOptions};
use crate::core::error::{AppError, Result};
use crate::services::session::SignerHandle;
use crate::utils::format::lower_hex;

/// Tokens dispensed per claim
pub const CLAIM_AMOUNT: u64 = 10;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
const DEFAULT_MAX_POLLS: u32 = 120;

/// A mined, successful claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimReceipt {
    pub tx_hash: B256,
    pub block_number: Option<u64>,
    pub symbol: &'static str,
    pub amount: u64,
}

pub struct FaucetClient {
    faucet: Address,
    poll_interval: Duration,
    max_polls: u32,
}

impl Default for FaucetClient {
    fn default() -> Self {
        Self::new(FAUCET_ADDRESS)
    }
}

impl FaucetClient {
    pub fn new(faucet: Address) -> Self {
        Self {
            faucet,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: DEFAULT_MAX_POLLS,
        }
    }

    /// How often and how many times to ask for the claim receipt
    pub fn with_receipt_polling(mut self, interval: Duration, max_polls: u32) -> Self {
        self.poll_interval = interval;
        self.max_polls = max_polls.max(1);
        self
    }

    pub fn address(&self) -> Address {
        self.faucet
    }

    /// Seconds until `user` may claim `token` again; `0` means ready.
    pub async fn cooldown(&self, provider: &dyn WalletProvider, user: Address, token: &Token) -> Result<u64> {
        let call = IFaucet::timeUntilNextClaimCall {
            user,
            token: token.address,
        };
        let data = provider::eth_call(provider, self.faucet, Bytes::from(call.abi_encode())).await?;
        let remaining = U256::abi_decode(&data)
            .map_err(|e| ProviderError::Decode(format!("timeUntilNextClaim: {}", e)))?;

        Ok(u64::try_from(remaining).unwrap_or(u64::MAX))
    }

    /// Claim `token` for the signer's account and wait until the transaction is mined.
    pub async fn claim(&self, signer: &SignerHandle, token: &Token) -> Result<ClaimReceipt> {
        let call = IFaucet::claimCall {
            token: token.address,
        };
        let tx_hash = signer
            .send_transaction(self.faucet, Bytes::from(call.abi_encode()))
            .await?;
        info!(
            tx = %tx_hash,
            token = token.symbol,
            account = %lower_hex(&signer.address()),
            "Faucet claim submitted"
        );

        let provider = signer.provider();
        for attempt in 1..=self.max_polls {
            match provider::transaction_receipt(provider.as_ref(), tx_hash).await? {
                Some(receipt) if receipt.succeeded() => {
                    let block_number = receipt.block_number.map(|b| b.to::<u64>());
                    info!(tx = %tx_hash, block = ?block_number, "Faucet claim mined");
                    return Ok(ClaimReceipt {
                        tx_hash,
                        block_number,
                        symbol: token.symbol,
                        amount: CLAIM_AMOUNT,
                    });
                }
                Some(_) => {
                    return Err(AppError::Chain(format!(
                        "Claim transaction {} reverted (cooldown active or faucet empty)",
                        tx_hash
                    )));
                }
                None => {
                    debug!(tx = %tx_hash, attempt, "Claim receipt pending");
                    if attempt < self.max_polls {
                        tokio::time::sleep(self.poll_interval).await;
                    }
                }
            }
        }

        Err(AppError::Chain(format!(
            "Claim transaction {} not mined after {} polls",
            tx_hash, self.max_polls
        )))
    }

    /// Ask the wallet to track `token`; `true` when the user accepted.
    pub async fn watch_asset(&self, provider: &dyn WalletProvider, token: &Token) -> Result<bool> {
        let options = WatchAssetOptions {
            address: token.address,
            symbol: token.symbol.to_string(),
            decimals: token.decimals,
            image: String::new(),
        };
        Ok(provider::watch_asset(provider, &options).await?)
    }
}
