//! # Client Configuration
//!
//! Read once from the environment at startup (a `.env` file is loaded first by
//! the binary), then checked with [`ClientConfig::validate`].
//!
//! | Variable                          | Default                      |
//! |-----------------------------------|------------------------------|
//! | `METACOW_API_URL`                 | `http://localhost:5000/api`  |
//! | `METACOW_RPC_URL`                 | unset (no wallet provider)   |
//! | `METACOW_FACTORY_ADDRESS`         | deployed factory             |
//! | `METACOW_FAUCET_ADDRESS`          | deployed faucet              |
//! | `METACOW_PAIR_ABI_PATH`           | bundled `abis/Pair.json`     |
//! | `METACOW_REPUTATION_CONCURRENCY`  | `1` (sequential)             |
//! | `METACOW_HTTP_TIMEOUT_SECS`       | `10`                         |
//! | `METACOW_RECEIPT_POLL_MS`         | `1000`                       |
//! | `METACOW_RECEIPT_MAX_POLLS`       | `120`                        |
//! | `METACOW_LOG_DIR`                 | `logs`                       |

use alloy_primitives::Address;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::chain::contracts::{PairInterface, FACTORY_ADDRESS, FAUCET_ADDRESS};
use crate::chain::provider::HttpWalletProvider;
use crate::core::error::{AppError, Result};
use crate::services::api::{ApiClient, DEFAULT_API_URL};
use crate::services::faucet::FaucetClient;
use crate::services::session::StaticProviderSource;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_url: String,
    /// Wallet provider JSON-RPC endpoint; `None` behaves like no wallet installed
    pub rpc_url: Option<Url>,
    pub factory_address: Address,
    pub faucet_address: Address,
    /// Overrides the bundled pair ABI used for the reputation capability check
    pub pair_abi_path: Option<PathBuf>,
    pub reputation_concurrency: usize,
    pub http_timeout: Duration,
    pub receipt_poll_interval: Duration,
    pub receipt_max_polls: u32,
    pub log_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            rpc_url: None,
            factory_address: FACTORY_ADDRESS,
            faucet_address: FAUCET_ADDRESS,
            pair_abi_path: None,
            reputation_concurrency: 1,
            http_timeout: Duration::from_secs(10),
            receipt_poll_interval: Duration::from_millis(1000),
            receipt_max_polls: 120,
            log_dir: PathBuf::from("logs"),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{} has an invalid value: {}", name, value)))
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source; unset or empty variables keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(api_url) = var("METACOW_API_URL") {
            config.api_url = api_url.trim().trim_end_matches('/').to_string();
        }

        if let Some(rpc_url) = var("METACOW_RPC_URL") {
            let url = Url::parse(rpc_url.trim())
                .map_err(|e| AppError::Config(format!("METACOW_RPC_URL is not a valid URL: {}", e)))?;
            config.rpc_url = Some(url);
        }

        if let Some(factory) = var("METACOW_FACTORY_ADDRESS") {
            config.factory_address = parse_var("METACOW_FACTORY_ADDRESS", &factory)?;
        }

        if let Some(faucet) = var("METACOW_FAUCET_ADDRESS") {
            config.faucet_address = parse_var("METACOW_FAUCET_ADDRESS", &faucet)?;
        }

        config.pair_abi_path = var("METACOW_PAIR_ABI_PATH").map(PathBuf::from);

        if let Some(concurrency) = var("METACOW_REPUTATION_CONCURRENCY") {
            config.reputation_concurrency = parse_var("METACOW_REPUTATION_CONCURRENCY", &concurrency)?;
        }

        if let Some(secs) = var("METACOW_HTTP_TIMEOUT_SECS") {
            config.http_timeout = Duration::from_secs(parse_var("METACOW_HTTP_TIMEOUT_SECS", &secs)?);
        }

        if let Some(ms) = var("METACOW_RECEIPT_POLL_MS") {
            config.receipt_poll_interval = Duration::from_millis(parse_var("METACOW_RECEIPT_POLL_MS", &ms)?);
        }

        if let Some(polls) = var("METACOW_RECEIPT_MAX_POLLS") {
            config.receipt_max_polls = parse_var("METACOW_RECEIPT_MAX_POLLS", &polls)?;
        }

        if let Some(dir) = var("METACOW_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let api_url = Url::parse(&self.api_url)
            .map_err(|e| AppError::Config(format!("METACOW_API_URL is not a valid URL: {}", e)))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(AppError::Config("METACOW_API_URL must use http or https".to_string()));
        }

        if let Some(rpc_url) = &self.rpc_url {
            if !matches!(rpc_url.scheme(), "http" | "https") {
                return Err(AppError::Config("METACOW_RPC_URL must use http or https".to_string()));
            }
        }

        if self.reputation_concurrency < 1 || self.reputation_concurrency > 64 {
            return Err(AppError::Config(
                "METACOW_REPUTATION_CONCURRENCY must be between 1 and 64".to_string(),
            ));
        }

        let timeout = self.http_timeout.as_secs();
        if !(1..=300).contains(&timeout) {
            return Err(AppError::Config(
                "METACOW_HTTP_TIMEOUT_SECS must be between 1 and 300".to_string(),
            ));
        }

        if self.receipt_poll_interval.is_zero() {
            return Err(AppError::Config("METACOW_RECEIPT_POLL_MS must be positive".to_string()));
        }

        if self.receipt_max_polls == 0 {
            return Err(AppError::Config("METACOW_RECEIPT_MAX_POLLS must be at least 1".to_string()));
        }

        Ok(())
    }

    /// Wallet provider from `rpc_url`, or none when it is unset
    pub fn provider_source(&self) -> StaticProviderSource {
        match &self.rpc_url {
            Some(url) => StaticProviderSource::new(Arc::new(HttpWalletProvider::new(
                url.clone(),
                self.http_timeout,
            ))),
            None => StaticProviderSource::none(),
        }
    }

    pub fn pair_interface(&self) -> Result<PairInterface> {
        match &self.pair_abi_path {
            Some(path) => PairInterface::from_path(path),
            None => PairInterface::bundled(),
        }
    }

    pub fn api_client(&self) -> ApiClient {
        ApiClient::new(self.api_url.clone(), self.http_timeout)
    }

    pub fn faucet_client(&self) -> FaucetClient {
        FaucetClient::new(self.faucet_address)
            .with_receipt_polling(self.receipt_poll_interval, self.receipt_max_polls)
    }
}
