//! # Pair Registry
//!
//! Read access to the factory's pair list and each pair's reputation hook.
//! [`PairRegistry`] is the seam the reputation aggregator depends on;
//! [`OnChainRegistry`] implements it with `eth_call`s through the wallet provider.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolCall, SolValue};
use async_trait::async_trait;
use std::sync::Arc;

use super::contracts::{IFactory, IPair};
use super::provider::{eth_call, ProviderError, WalletProvider};

#[async_trait]
pub trait PairRegistry: Send + Sync {
    /// Number of pairs registered in the factory
    async fn pair_count(&self) -> Result<u64, ProviderError>;

    /// Pair address at a registration index
    async fn pair_at(&self, index: u64) -> Result<Address, ProviderError>;

    /// `getReputationScore(wallet)` on one pair
    async fn reputation_score(&self, pair: Address, wallet: Address) -> Result<U256, ProviderError>;
}

/// Factory and pair reads over a wallet provider.
///
/// Without a provider every read fails with a transport error, so a scan
/// reports no reputation instead of aborting its caller.
pub struct OnChainRegistry {
    provider: Option<Arc<dyn WalletProvider>>,
    factory: Address,
}

impl OnChainRegistry {
    pub fn new(provider: Arc<dyn WalletProvider>, factory: Address) -> Self {
        Self::from_provider(Some(provider), factory)
    }

    /// Registry over whatever provider the session has, possibly none
    pub fn from_provider(provider: Option<Arc<dyn WalletProvider>>, factory: Address) -> Self {
        Self { provider, factory }
    }

    pub fn factory(&self) -> Address {
        self.factory
    }

    async fn call<C: SolCall>(&self, to: Address, call: C) -> Result<Bytes, ProviderError> {
        let provider = self
            .provider
            .as_deref()
            .ok_or_else(|| ProviderError::Transport("no provider".to_string()))?;
        eth_call(provider, to, Bytes::from(call.abi_encode())).await
    }
}

fn decode_uint(data: &[u8], what: &str) -> Result<U256, ProviderError> {
    U256::abi_decode(data).map_err(|e| ProviderError::Decode(format!("{}: {}", what, e)))
}

fn decode_address(data: &[u8], what: &str) -> Result<Address, ProviderError> {
    Address::abi_decode(data).map_err(|e| ProviderError::Decode(format!("{}: {}", what, e)))
}

#[async_trait]
impl PairRegistry for OnChainRegistry {
    async fn pair_count(&self) -> Result<u64, ProviderError> {
        let data = self.call(self.factory, IFactory::allPairsLengthCall {}).await?;
        let count = decode_uint(&data, "allPairsLength")?;
        u64::try_from(count)
            .map_err(|_| ProviderError::Decode(format!("allPairsLength out of range: {}", count)))
    }

    async fn pair_at(&self, index: u64) -> Result<Address, ProviderError> {
        let call = IFactory::allPairsCall {
            index: U256::from(index),
        };
        let data = self.call(self.factory, call).await?;
        decode_address(&data, "allPairs")
    }

    async fn reputation_score(&self, pair: Address, wallet: Address) -> Result<U256, ProviderError> {
        let data = self
            .call(pair, IPair::getReputationScoreCall { user: wallet })
            .await?;
        decode_uint(&data, "getReputationScore")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::mock::{fake_chain_provider, FakeChain};
    use alloy_primitives::address;

    const FACTORY: Address = address!("0x524fec22546b087e91d198745cdd6ea94c057d79");
    const WALLET: Address = address!("0x0000000000000000000000000000000000000abc");

    #[tokio::test]
    async fn test_reads_pairs_and_scores() {
        let pair_a = address!("0x00000000000000000000000000000000000000a1");
        let pair_b = address!("0x00000000000000000000000000000000000000b2");
        let chain = FakeChain::new(FACTORY)
            .with_pair(pair_a, Some(U256::from(5)))
            .with_pair(pair_b, None);
        let registry = OnChainRegistry::new(fake_chain_provider(chain), FACTORY);

        assert_eq!(registry.pair_count().await.unwrap(), 2);
        assert_eq!(registry.pair_at(0).await.unwrap(), pair_a);
        assert_eq!(registry.pair_at(1).await.unwrap(), pair_b);
        assert_eq!(
            registry.reputation_score(pair_a, WALLET).await.unwrap(),
            U256::from(5)
        );
        assert!(registry.reputation_score(pair_b, WALLET).await.is_err());
    }

    #[tokio::test]
    async fn test_out_of_range_index_reverts() {
        let chain = FakeChain::new(FACTORY);
        let registry = OnChainRegistry::new(fake_chain_provider(chain), FACTORY);

        assert_eq!(registry.pair_count().await.unwrap(), 0);
        assert!(registry.pair_at(0).await.is_err());
    }

    #[tokio::test]
    async fn test_factory_failure_surfaces() {
        let chain = FakeChain::new(FACTORY).failing_factory();
        let registry = OnChainRegistry::new(fake_chain_provider(chain), FACTORY);

        let err = registry.pair_count().await.unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)));
    }

    #[tokio::test]
    async fn test_reads_fail_without_provider() {
        let registry = OnChainRegistry::from_provider(None, FACTORY);

        let err = registry.pair_count().await.unwrap_err();
        assert!(matches!(err, ProviderError::Transport(msg) if msg == "no provider"));
        assert!(registry.reputation_score(FACTORY, WALLET).await.is_err());
    }
}
