//! # Wallet Provider
//!
//! The wallet extension is reached through a single EIP-1193 style entry point,
//! `request(method, params)`. Everything the client does on chain (account
//! authorization, balance, contract reads, transactions) is routed through it.
//!
//! [`HttpWalletProvider`] speaks JSON-RPC 2.0 over HTTP to a wallet or node
//! endpoint. Tests substitute an in-memory implementation of [`WalletProvider`].
//!
//! The free functions below wrap the raw `request` with typed parameters and
//! results so callers never handle JSON directly.

use alloy_primitives::{Address, Bytes, B256, U256, U64};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// EIP-1193 error code for "user rejected the request"
pub const USER_REJECTED_CODE: i64 = 4001;

/// Errors raised by a wallet provider or its transport
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider answered with a JSON-RPC error object
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    /// The request never produced a JSON-RPC answer
    #[error("Transport error: {0}")]
    Transport(String),
    /// The answer did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),
    /// The signer was revoked by a disconnect
    #[error("Signer revoked: wallet session ended")]
    SignerRevoked,
}

impl ProviderError {
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, ProviderError::Rpc { code, .. } if *code == USER_REJECTED_CODE)
    }
}

/// Minimal EIP-1193 request interface.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;
}

/// JSON-RPC 2.0 over HTTP.
pub struct HttpWalletProvider {
    client: Client,
    url: Url,
    next_id: AtomicU64,
}

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcErrorBody>,
}

#[derive(Deserialize)]
struct JsonRpcErrorBody {
    code: i64,
    #[serde(default)]
    message: String,
}

impl HttpWalletProvider {
    pub fn new(url: Url, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            url,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl WalletProvider for HttpWalletProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        tracing::trace!(id, method, "JSON-RPC request");

        let response = self
            .client
            .post(self.url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        // Some nodes answer RPC errors with a non-2xx status but a valid body
        let parsed: JsonRpcResponse = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(ProviderError::Transport(format!("HTTP {}", status)));
            }
            Err(e) => return Err(ProviderError::Decode(e.to_string())),
        };

        if let Some(err) = parsed.error {
            return Err(ProviderError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        Ok(parsed.result.unwrap_or(Value::Null))
    }
}

/// Subset of a transaction receipt the client looks at
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub block_number: Option<U64>,
    #[serde(default)]
    pub status: Option<U64>,
}

impl TransactionReceipt {
    /// Pre-byzantium receipts carry no status; treat them as successful.
    pub fn succeeded(&self) -> bool {
        self.status.map(|s| s == U64::from(1)).unwrap_or(true)
    }
}

/// ERC-20 description passed to `wallet_watchAsset`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WatchAssetOptions {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
    pub image: String,
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, ProviderError> {
    serde_json::from_value(value).map_err(|e| ProviderError::Decode(format!("{}: {}", what, e)))
}

/// Prompt the user to authorize accounts; resolves once they answer.
pub async fn request_accounts(provider: &dyn WalletProvider) -> Result<Vec<Address>, ProviderError> {
    let value = provider.request("eth_requestAccounts", json!([])).await?;
    decode(value, "eth_requestAccounts")
}

/// Network identifier as a decimal string, e.g. `"97"`.
pub async fn chain_id(provider: &dyn WalletProvider) -> Result<String, ProviderError> {
    let value = provider.request("eth_chainId", json!([])).await?;
    let id: U256 = decode(value, "eth_chainId")?;
    Ok(id.to_string())
}

/// Native balance in wei at the latest block.
pub async fn get_balance(provider: &dyn WalletProvider, address: Address) -> Result<U256, ProviderError> {
    let value = provider
        .request("eth_getBalance", json!([address, "latest"]))
        .await?;
    decode(value, "eth_getBalance")
}

/// Read-only contract call against the latest block.
pub async fn eth_call(provider: &dyn WalletProvider, to: Address, data: Bytes) -> Result<Bytes, ProviderError> {
    let value = provider
        .request("eth_call", json!([{ "to": to, "data": data }, "latest"]))
        .await?;
    decode(value, "eth_call")
}

/// Ask the wallet to sign and broadcast a transaction; returns its hash.
pub async fn send_transaction(
    provider: &dyn WalletProvider,
    from: Address,
    to: Address,
    data: Bytes,
) -> Result<B256, ProviderError> {
    let value = provider
        .request(
            "eth_sendTransaction",
            json!([{ "from": from, "to": to, "data": data }]),
        )
        .await?;
    decode(value, "eth_sendTransaction")
}

/// Receipt for a mined transaction, `None` while it is pending.
pub async fn transaction_receipt(
    provider: &dyn WalletProvider,
    hash: B256,
) -> Result<Option<TransactionReceipt>, ProviderError> {
    let value = provider
        .request("eth_getTransactionReceipt", json!([hash]))
        .await?;
    decode(value, "eth_getTransactionReceipt")
}

/// Ask the wallet to track an ERC-20; `true` when the user accepted.
pub async fn watch_asset(provider: &dyn WalletProvider, options: &WatchAssetOptions) -> Result<bool, ProviderError> {
    let value = provider
        .request(
            "wallet_watchAsset",
            json!({ "type": "ERC20", "options": options }),
        )
        .await?;
    decode(value, "wallet_watchAsset")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn provider_for(server: &MockServer) -> HttpWalletProvider {
        let url = Url::parse(&server.uri()).unwrap();
        HttpWalletProvider::new(url, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_chain_id_is_decimal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "eth_chainId" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0", "id": 1, "result": "0x61"
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        assert_eq!(chain_id(&provider).await.unwrap(), "97");
    }

    #[tokio::test]
    async fn test_request_accounts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "eth_requestAccounts" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0", "id": 1,
                "result": ["0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be"]
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let accounts = request_accounts(&provider).await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(
            accounts[0].to_string().to_lowercase(),
            "0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be"
        );
    }

    #[tokio::test]
    async fn test_rpc_error_maps_user_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0", "id": 1,
                "error": { "code": 4001, "message": "User rejected the request." }
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let err = request_accounts(&provider).await.unwrap_err();
        assert!(err.is_user_rejection());
    }

    #[tokio::test]
    async fn test_http_failure_without_body_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let err = provider.request("eth_chainId", json!([])).await.unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)));
    }

    #[tokio::test]
    async fn test_pending_receipt_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0", "id": 1, "result": null
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let receipt = transaction_receipt(&provider, B256::ZERO).await.unwrap();
        assert!(receipt.is_none());
    }

    #[test]
    fn test_receipt_status() {
        let receipt: TransactionReceipt = serde_json::from_value(json!({
            "transactionHash": format!("0x{}", "11".repeat(32)),
            "blockNumber": "0x10",
            "status": "0x0"
        }))
        .unwrap();
        assert!(!receipt.succeeded());
    }
}
