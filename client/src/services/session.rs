//! # Wallet Session Manager
//!
//! Owns the wallet connection state and is the only thing allowed to change it.
//!
//! ## Lifecycle
//!
//! ```text
//!              connect() ok
//!  Disconnected ───────────────▶ Connected
//!       ▲   │                        │
//!       │   │ connect() err          │ disconnect()
//!       │   ▼                        │
//!       └─ (unchanged) ◀─────────────┘
//! ```
//!
//! Mutations are funnelled through [`WalletSessionManager::handle`] as
//! [`SessionCommand`]s. `connect()` and `disconnect()` are thin wrappers over it.
//!
//! ## Concurrency
//!
//! - Connect handshakes are serialized by an async mutex. A caller that queued
//!   behind a handshake which succeeded gets that connection back instead of
//!   prompting the wallet a second time.
//! - Readers take a snapshot under a `parking_lot::RwLock`; the session is
//!   replaced as a whole, so a half-populated session is never visible.
//! - `disconnect()` bumps an epoch. A handshake still in flight notices the
//!   bump before committing and fails with [`ConnectionError::Superseded`].
//! - Signer handles carry a cancellation token that is cancelled when the
//!   session that issued them ends.

use alloy_primitives::{Address, Bytes, B256};
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::chain::provider::{self, ProviderError, WalletProvider};
use crate::utils::format::{format_ether, lower_hex};

/// Wallet connection errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectionError {
    /// No wallet extension installed or configured
    #[error("No wallet provider available")]
    ProviderUnavailable,
    /// The user declined the authorization prompt
    #[error("Connection request rejected by user")]
    UserRejected,
    /// Authorization succeeded but no account was shared
    #[error("Wallet returned no accounts")]
    NoAccounts,
    /// Any other handshake failure
    #[error("Wallet handshake failed: {0}")]
    Handshake(String),
    /// `disconnect()` ran while the handshake was in flight
    #[error("Connection superseded by disconnect")]
    Superseded,
}

impl From<ProviderError> for ConnectionError {
    fn from(err: ProviderError) -> Self {
        if err.is_user_rejection() {
            ConnectionError::UserRejected
        } else {
            ConnectionError::Handshake(err.to_string())
        }
    }
}

/// Where the session gets its provider handle from.
///
/// Returns `None` when no wallet extension is present.
pub trait ProviderSource: Send + Sync {
    fn provider(&self) -> Option<Arc<dyn WalletProvider>>;
}

/// A fixed provider, or none at all
pub struct StaticProviderSource(Option<Arc<dyn WalletProvider>>);

impl StaticProviderSource {
    pub fn new(provider: Arc<dyn WalletProvider>) -> Self {
        Self(Some(provider))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl ProviderSource for StaticProviderSource {
    fn provider(&self) -> Option<Arc<dyn WalletProvider>> {
        self.0.clone()
    }
}

/// Capability to authorize transactions for the connected account.
///
/// Clones share one revocation token; once the issuing session ends every
/// clone refuses to sign.
#[derive(Clone)]
pub struct SignerHandle {
    address: Address,
    provider: Arc<dyn WalletProvider>,
    revoked: CancellationToken,
}

impl SignerHandle {
    fn new(address: Address, provider: Arc<dyn WalletProvider>) -> Self {
        Self {
            address,
            provider,
            revoked: CancellationToken::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked.is_cancelled()
    }

    /// Provider the signer routes through, for follow-up reads such as receipts
    pub fn provider(&self) -> Arc<dyn WalletProvider> {
        Arc::clone(&self.provider)
    }

    /// Have the wallet sign and broadcast a call to `to`.
    pub async fn send_transaction(&self, to: Address, data: Bytes) -> Result<B256, ProviderError> {
        if self.is_revoked() {
            return Err(ProviderError::SignerRevoked);
        }
        provider::send_transaction(self.provider.as_ref(), self.address, to, data).await
    }

    fn revoke(&self) {
        self.revoked.cancel();
    }
}

impl fmt::Debug for SignerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerHandle")
            .field("address", &lower_hex(&self.address))
            .field("revoked", &self.is_revoked())
            .finish()
    }
}

/// Snapshot of the wallet connection
#[derive(Debug, Clone)]
pub struct WalletSession {
    pub address: Option<Address>,
    pub chain_id: Option<String>,
    /// Native balance in ether units at the last refresh
    pub balance: String,
    pub signer: Option<SignerHandle>,
    /// True only while a connect handshake is in flight
    pub connecting: bool,
}

impl Default for WalletSession {
    fn default() -> Self {
        Self {
            address: None,
            chain_id: None,
            balance: "0".to_string(),
            signer: None,
            connecting: false,
        }
    }
}

impl WalletSession {
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    /// Lowercase hex address, if connected
    pub fn address_hex(&self) -> Option<String> {
        self.address.as_ref().map(lower_hex)
    }
}

/// What a successful connect reports back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub address: Address,
    pub chain_id: String,
    pub balance: String,
}

/// Mutations accepted by the manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Connect,
    Disconnect,
}

/// Outcome of a [`SessionCommand`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Connected(ConnectionInfo),
    Disconnected,
}

/// Clears `connecting` however the handshake ends, including when the
/// connect future is dropped mid-flight.
struct ConnectingGuard<'a> {
    state: &'a RwLock<WalletSession>,
}

impl<'a> ConnectingGuard<'a> {
    fn enter(state: &'a RwLock<WalletSession>) -> Self {
        state.write().connecting = true;
        Self { state }
    }
}

impl Drop for ConnectingGuard<'_> {
    fn drop(&mut self) {
        self.state.write().connecting = false;
    }
}

pub struct WalletSessionManager {
    source: Arc<dyn ProviderSource>,
    state: RwLock<WalletSession>,
    connect_lock: Mutex<()>,
    /// Bumped by every committed connect and every disconnect
    epoch: AtomicU64,
}

impl WalletSessionManager {
    pub fn new(source: Arc<dyn ProviderSource>) -> Self {
        Self {
            source,
            state: RwLock::new(WalletSession::default()),
            connect_lock: Mutex::new(()),
            epoch: AtomicU64::new(0),
        }
    }

    /// Single entry point for every session mutation.
    pub async fn handle(&self, command: SessionCommand) -> Result<SessionEvent, ConnectionError> {
        match command {
            SessionCommand::Connect => self.run_connect().await.map(SessionEvent::Connected),
            SessionCommand::Disconnect => {
                self.clear_session();
                Ok(SessionEvent::Disconnected)
            }
        }
    }

    /// Connect to the wallet, prompting the user for authorization.
    pub async fn connect(&self) -> Result<ConnectionInfo, ConnectionError> {
        match self.handle(SessionCommand::Connect).await? {
            SessionEvent::Connected(info) => Ok(info),
            SessionEvent::Disconnected => Err(ConnectionError::Superseded),
        }
    }

    /// Drop the connection. Idempotent.
    pub fn disconnect(&self) {
        self.clear_session();
    }

    pub fn snapshot(&self) -> WalletSession {
        self.state.read().clone()
    }

    pub fn is_connected(&self) -> bool {
        self.state.read().is_connected()
    }

    pub fn is_connecting(&self) -> bool {
        self.state.read().connecting
    }

    pub fn address(&self) -> Option<Address> {
        self.state.read().address
    }

    pub fn signer(&self) -> Option<SignerHandle> {
        self.state.read().signer.clone()
    }

    /// Read-capable provider, available whether or not a wallet is connected
    pub fn provider(&self) -> Option<Arc<dyn WalletProvider>> {
        self.source.provider()
    }

    fn current_info(&self) -> Option<ConnectionInfo> {
        let state = self.state.read();
        Some(ConnectionInfo {
            address: state.address?,
            chain_id: state.chain_id.clone()?,
            balance: state.balance.clone(),
        })
    }

    async fn run_connect(&self) -> Result<ConnectionInfo, ConnectionError> {
        let observed = self.epoch.load(Ordering::Acquire);
        let _flight = self.connect_lock.lock().await;

        if self.epoch.load(Ordering::Acquire) != observed {
            if let Some(info) = self.current_info() {
                debug!(address = %lower_hex(&info.address), "Joined in-flight wallet connection");
                return Ok(info);
            }
        }

        let started = self.epoch.load(Ordering::Acquire);
        let _connecting = ConnectingGuard::enter(&self.state);

        let result = self.handshake(started).await;
        if let Err(e) = &result {
            warn!(error = %e, "Wallet connection failed");
        }
        result
    }

    async fn handshake(&self, started: u64) -> Result<ConnectionInfo, ConnectionError> {
        let provider = self
            .source
            .provider()
            .ok_or(ConnectionError::ProviderUnavailable)?;

        let accounts = provider::request_accounts(provider.as_ref()).await?;
        let address = *accounts.first().ok_or(ConnectionError::NoAccounts)?;
        let chain_id = provider::chain_id(provider.as_ref()).await?;
        let wei = provider::get_balance(provider.as_ref(), address).await?;
        let balance = format_ether(wei);

        let mut state = self.state.write();
        if self.epoch.load(Ordering::Acquire) != started {
            return Err(ConnectionError::Superseded);
        }

        if let Some(previous) = state.signer.take() {
            previous.revoke();
        }
        *state = WalletSession {
            address: Some(address),
            chain_id: Some(chain_id.clone()),
            balance: balance.clone(),
            signer: Some(SignerHandle::new(address, provider)),
            connecting: false,
        };
        self.epoch.fetch_add(1, Ordering::AcqRel);
        drop(state);

        info!(
            address = %lower_hex(&address),
            chain_id = %chain_id,
            balance = %balance,
            "Wallet connected"
        );

        Ok(ConnectionInfo {
            address,
            chain_id,
            balance,
        })
    }

    fn clear_session(&self) {
        let mut state = self.state.write();
        let was_connected = state.is_connected();

        if let Some(signer) = state.signer.take() {
            signer.revoke();
        }
        // `connecting` keeps tracking the in-flight handshake, which will see the
        // epoch bump and abort.
        let connecting = state.connecting;
        *state = WalletSession {
            connecting,
            ..WalletSession::default()
        };
        self.epoch.fetch_add(1, Ordering::AcqRel);
        drop(state);

        if was_connected {
            info!("Wallet disconnected");
        }
    }
}
