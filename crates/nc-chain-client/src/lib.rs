use alloy_primitives::U256;
use async_trait::async_trait;
use nc_api_types::{Account, ChainHex, ChainParams};
use thiserror::Error;

/// EIP-1193 error code a wallet returns when asked to switch to a chain it
/// has no connection parameters for.
pub const UNRECOGNIZED_CHAIN_CODE: i64 = 4902;

/// EIP-1193 error code for a request the user declined in the wallet UI.
pub const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("no injected wallet provider is available")]
    Unavailable,
    #[error("wallet rejected the request (code {code}): {message}")]
    Rejected { code: i64, message: String },
    #[error("chain {0} is not registered with the wallet")]
    UnrecognizedChain(ChainHex),
    #[error("provider transport failure: {0}")]
    Transport(String),
    #[error("malformed provider response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Classify a raw EIP-1193 error object. The unrecognized-chain code gets
    /// its own variant so callers can run the add-then-retry remediation.
    pub fn from_rpc(code: i64, message: String, requested_chain: Option<&ChainHex>) -> Self {
        match (code, requested_chain) {
            (UNRECOGNIZED_CHAIN_CODE, Some(chain)) => {
                ProviderError::UnrecognizedChain(chain.clone())
            }
            _ => ProviderError::Rejected { code, message },
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// The injected wallet provider surface the app depends on.
///
/// Implemented over `window.ethereum` in the browser and by in-memory fakes
/// in tests. Futures are `?Send`: the real implementation lives on the
/// single-threaded wasm event loop.
#[async_trait(?Send)]
pub trait WalletBridge {
    /// `eth_accounts` — accounts already authorized for this origin, no prompt.
    async fn authorized_accounts(&self) -> ProviderResult<Vec<Account>>;

    /// `eth_requestAccounts` — may open the wallet's permission UI.
    async fn request_accounts(&self) -> ProviderResult<Vec<Account>>;

    /// `eth_chainId`.
    async fn chain_id(&self) -> ProviderResult<ChainHex>;

    /// `wallet_switchEthereumChain`.
    async fn switch_chain(&self, chain: &ChainHex) -> ProviderResult<()>;

    /// `wallet_addEthereumChain`.
    async fn add_chain(&self, params: &ChainParams) -> ProviderResult<()>;
}

/// A mined transaction, reduced to what the flows branch on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub hash: String,
    pub status: u64,
}

impl TxReceipt {
    pub fn succeeded(&self) -> bool {
        self.status == 1
    }
}

/// The name-service contract surface. Write methods block until the
/// transaction is mined and return its receipt.
#[async_trait(?Send)]
pub trait NameRegistry {
    /// `register(name)` carrying `fee_wei` as the transaction value.
    async fn register(&self, name: &str, fee_wei: U256) -> ProviderResult<TxReceipt>;

    /// `setRecord(name, record)`.
    async fn set_record(&self, name: &str, record: &str) -> ProviderResult<TxReceipt>;

    /// `getAllNames()`.
    async fn all_names(&self) -> ProviderResult<Vec<String>>;

    /// `records(name)`.
    async fn record_of(&self, name: &str) -> ProviderResult<String>;

    /// `domains(name)` — the owning account.
    async fn owner_of(&self, name: &str) -> ProviderResult<Account>;
}
