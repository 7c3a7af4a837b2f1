//! In-memory wallet provider and contract fakes for tests.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolCall, SolValue};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Notify;

use super::contracts::{IFactory, IPair};
use super::provider::{ProviderError, WalletProvider};

type Handler = Arc<dyn Fn(&Value) -> Result<Value, ProviderError> + Send + Sync>;

/// Scriptable provider: one handler per RPC method, optional gates that hold
/// a method until notified.
#[derive(Default)]
pub(crate) struct MockProvider {
    handlers: Mutex<HashMap<String, Handler>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that authorizes `accounts` on `chain_id_hex` with `balance_hex` wei
    pub fn wallet(accounts: &[&str], chain_id_hex: &str, balance_hex: &str) -> Self {
        Self::new()
            .respond("eth_requestAccounts", json!(accounts))
            .respond("eth_chainId", json!(chain_id_hex))
            .respond("eth_getBalance", json!(balance_hex))
    }

    pub fn on<F>(self, method: &str, handler: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, ProviderError> + Send + Sync + 'static,
    {
        self.handlers
            .lock()
            .insert(method.to_string(), Arc::new(handler));
        self
    }

    pub fn respond(self, method: &str, value: Value) -> Self {
        self.on(method, move |_| Ok(value.clone()))
    }

    pub fn fail(self, method: &str, err: ProviderError) -> Self {
        self.on(method, move |_| Err(err.clone()))
    }

    pub fn gate(self, method: &str, notify: Arc<Notify>) -> Self {
        self.gates.lock().insert(method.to_string(), notify);
        self
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.calls.lock().iter().filter(|(m, _)| m == method).count()
    }

    pub fn params_of(&self, method: &str) -> Vec<Value> {
        self.calls
            .lock()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, p)| p.clone())
            .collect()
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        self.calls.lock().push((method.to_string(), params.clone()));

        let gate = self.gates.lock().get(method).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let handler = self.handlers.lock().get(method).cloned();
        match handler {
            Some(handler) => handler(&params),
            None => Err(ProviderError::Rpc {
                code: -32601,
                message: format!("method not found: {}", method),
            }),
        }
    }
}

fn revert() -> ProviderError {
    ProviderError::Rpc {
        code: 3,
        message: "execution reverted".to_string(),
    }
}

fn word<T: SolValue>(value: T) -> Result<Value, ProviderError> {
    let bytes = Bytes::from(value.abi_encode());
    serde_json::to_value(bytes).map_err(|e| ProviderError::Decode(e.to_string()))
}

/// Factory plus pairs answering `eth_call`. A pair with no score reverts on
/// `getReputationScore`.
#[derive(Clone)]
pub(crate) struct FakeChain {
    factory: Address,
    pairs: Vec<(Address, Option<U256>)>,
    factory_fails: bool,
}

impl FakeChain {
    pub fn new(factory: Address) -> Self {
        Self {
            factory,
            pairs: Vec::new(),
            factory_fails: false,
        }
    }

    pub fn with_pair(mut self, pair: Address, score: Option<U256>) -> Self {
        self.pairs.push((pair, score));
        self
    }

    pub fn failing_factory(mut self) -> Self {
        self.factory_fails = true;
        self
    }

    fn handle_call(&self, params: &Value) -> Result<Value, ProviderError> {
        let call = &params[0];
        let to: Address = serde_json::from_value(call["to"].clone())
            .map_err(|e| ProviderError::Decode(e.to_string()))?;
        let data: Bytes = serde_json::from_value(call["data"].clone())
            .map_err(|e| ProviderError::Decode(e.to_string()))?;
        if data.len() < 4 {
            return Err(revert());
        }
        let selector = &data[..4];

        if to == self.factory {
            if self.factory_fails {
                return Err(ProviderError::Transport("connection refused".to_string()));
            }
            if selector == IFactory::allPairsLengthCall::SELECTOR {
                return word(U256::from(self.pairs.len()));
            }
            if selector == IFactory::allPairsCall::SELECTOR && data.len() >= 36 {
                let index = U256::from_be_slice(&data[4..36]);
                let index = usize::try_from(index).map_err(|_| revert())?;
                return match self.pairs.get(index) {
                    Some((pair, _)) => word(*pair),
                    None => Err(revert()),
                };
            }
            return Err(revert());
        }

        if selector == IPair::getReputationScoreCall::SELECTOR {
            return match self.pairs.iter().find(|(pair, _)| *pair == to) {
                Some((_, Some(score))) => word(*score),
                _ => Err(revert()),
            };
        }

        Err(revert())
    }
}

pub(crate) fn fake_chain_provider(chain: FakeChain) -> Arc<dyn WalletProvider> {
    Arc::new(MockProvider::new().on("eth_call", move |params| chain.handle_call(params)))
}
