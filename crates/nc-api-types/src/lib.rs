use serde::{Deserialize, Serialize};
use std::fmt;

/// A wallet account identifier as reported by the provider (`0x`-prefixed hex).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account(pub String);

impl Account {
    /// Providers are inconsistent about address casing; comparisons must not be.
    pub fn matches(&self, other: &Account) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A chain identifier in the provider's hex form, e.g. `0x13881`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChainHex(pub String);

impl fmt::Display for ChainHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One registered name as projected from the contract's read methods.
/// `id` is the name's position in the `getAllNames()` result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MintRecord {
    pub id: usize,
    pub name: String,
    pub record: String,
    pub owner: Account,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Connection parameters for `wallet_addEthereumChain` (EIP-3085).
/// Field names follow the provider's wire casing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChainParams {
    pub chain_id: ChainHex,
    pub chain_name: String,
    pub rpc_urls: Vec<String>,
    pub native_currency: NativeCurrency,
    pub block_explorer_urls: Vec<String>,
}
