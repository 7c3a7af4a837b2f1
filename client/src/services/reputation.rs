//! # On-Chain Reputation Aggregator
//!
//! Sums a wallet's reputation score across every pair registered in the factory.
//!
//! ## Algorithm
//!
//! 1. Read the pair count from the factory. Failure ends the scan with no total.
//! 2. Read each pair address in registration order.
//! 3. If the pair ABI declares `getReputationScore`, ask each pair for the
//!    wallet's score and add it to the running total.
//!
//! Steps 2 and 3 are best effort: a pair whose address or score cannot be read
//! is skipped with a debug log, exactly as if it were not registered.
//!
//! The capability check in step 3 inspects the ABI definition, so it is decided
//! once per aggregator and applies to every pair alike. A deployed pair that
//! lacks the function is only discovered when its call fails.
//!
//! Nothing is cached between scans and there are no retries.

use alloy_primitives::{Address, U256};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info_span, warn, Instrument};
use uuid::Uuid;

use crate::chain::contracts::PairInterface;
use crate::chain::registry::PairRegistry;
use crate::utils::format::lower_hex;

/// Result of one reputation scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReputationQuery {
    pub target_wallet: Address,
    /// Pairs read from the factory, in registration order
    pub pair_addresses: Vec<Address>,
    /// Scores that were read successfully; failed or unsupported pairs are absent
    pub per_pair_score: HashMap<Address, U256>,
    /// `None` when the scan failed before reading any pair, or was cancelled
    pub total_score: Option<U256>,
}

impl ReputationQuery {
    fn unresolved(target_wallet: Address) -> Self {
        Self {
            target_wallet,
            pair_addresses: Vec::new(),
            per_pair_score: HashMap::new(),
            total_score: None,
        }
    }
}

/// One pair's contribution to a scan
struct PairRead {
    pair: Option<Address>,
    score: Option<U256>,
}

pub struct ReputationAggregator {
    registry: Arc<dyn PairRegistry>,
    supports_reputation: bool,
    concurrency: usize,
}

impl ReputationAggregator {
    /// Aggregator reading pairs sequentially.
    pub fn new(registry: Arc<dyn PairRegistry>, pair_interface: &PairInterface) -> Self {
        let supports_reputation = pair_interface.supports_reputation();
        if !supports_reputation {
            warn!("Pair ABI does not declare getReputationScore; every pair will be skipped");
        }

        Self {
            registry,
            supports_reputation,
            concurrency: 1,
        }
    }

    /// Read up to `concurrency` pairs at once. `0` is treated as `1`.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Total reputation of `wallet`, or `None` if the factory could not be read.
    pub async fn compute_reputation(&self, wallet: Address) -> Option<U256> {
        self.scan(wallet, &CancellationToken::new()).await.total_score
    }

    /// Like [`compute_reputation`](Self::compute_reputation), yielding `None`
    /// if `cancel` fires first.
    pub async fn compute_reputation_with_cancel(
        &self,
        wallet: Address,
        cancel: &CancellationToken,
    ) -> Option<U256> {
        self.scan(wallet, cancel).await.total_score
    }

    /// Full scan with per-pair detail.
    pub async fn scan(&self, wallet: Address, cancel: &CancellationToken) -> ReputationQuery {
        let span = info_span!(
            "reputation_scan",
            scan_id = %Uuid::new_v4(),
            wallet = %lower_hex(&wallet)
        );

        async {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("Reputation scan cancelled");
                    ReputationQuery::unresolved(wallet)
                }
                query = self.run(wallet) => query,
            }
        }
        .instrument(span)
        .await
    }

    async fn run(&self, wallet: Address) -> ReputationQuery {
        let count = match self.registry.pair_count().await {
            Ok(count) => count,
            Err(e) => {
                warn!(error = %e, "Failed to read pair count from factory");
                return ReputationQuery::unresolved(wallet);
            }
        };
        debug!(pairs = count, "Scanning pairs");

        let reads: Vec<PairRead> = stream::iter(0..count)
            .map(|index| self.read_pair(index, wallet))
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut query = ReputationQuery::unresolved(wallet);
        let mut total = U256::ZERO;
        for read in reads {
            let Some(pair) = read.pair else { continue };
            query.pair_addresses.push(pair);
            if let Some(score) = read.score {
                total = total.saturating_add(score);
                query
                    .per_pair_score
                    .entry(pair)
                    .and_modify(|s| *s = s.saturating_add(score))
                    .or_insert(score);
            }
        }
        query.total_score = Some(total);

        debug!(
            scored = query.per_pair_score.len(),
            total = %total,
            "Reputation scan complete"
        );
        query
    }

    async fn read_pair(&self, index: u64, wallet: Address) -> PairRead {
        let pair = match self.registry.pair_at(index).await {
            Ok(pair) => pair,
            Err(e) => {
                debug!(index, error = %e, "Skipping pair: address read failed");
                return PairRead {
                    pair: None,
                    score: None,
                };
            }
        };

        if !self.supports_reputation {
            return PairRead {
                pair: Some(pair),
                score: None,
            };
        }

        let score = match self.registry.reputation_score(pair, wallet).await {
            Ok(score) => Some(score),
            Err(e) => {
                debug!(pair = %lower_hex(&pair), error = %e, "Skipping pair: score read failed");
                None
            }
        };

        PairRead {
            pair: Some(pair),
            score,
        }
    }
}
