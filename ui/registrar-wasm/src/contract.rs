//! Name-service contract client.
//!
//! ABI encoding/decoding is handled by `alloy-sol-types`; the encoded calls
//! travel as `eth_call` / `eth_sendTransaction` JSON-RPC requests through the
//! injected provider, which signs with the connected account. Writes block
//! until a receipt is available.

use alloy_primitives::{U256, hex};
use alloy_sol_types::{SolCall, sol};
use async_trait::async_trait;
use gloo_timers::future::sleep;
use js_sys::Reflect;
use nc_api_types::Account;
use nc_chain_client::{NameRegistry, ProviderError, ProviderResult, TxReceipt};
use nc_registrar_core::Registrar;
use std::time::Duration;
use wasm_bindgen::JsValue;

use crate::provider::InjectedProvider;

/// Where the registrar contract lives on Polygon Mumbai.
pub const CONTRACT_ADDRESS: &str = "0x77e2837EfE19950eB5F6425512D88Dc8CC42c465";

/// Receipt polling cadence. The cap keeps a dropped transaction from pinning
/// the flow forever; an exhausted poll surfaces as a transport error.
const RECEIPT_POLL_MS: u64 = 2_000;
const RECEIPT_POLL_LIMIT: u32 = 150;

sol! {
    function register(string name) payable;
    function setRecord(string name, string record);
    function getAllNames() view returns (string[] names);
    function records(string name) view returns (string record);
    function domains(string name) view returns (address owner);
}

/// Contract handle. Reads work without a sender; writes need the account the
/// wallet should sign with.
pub struct NameServiceContract {
    provider: InjectedProvider,
    sender: Option<Account>,
}

impl NameServiceContract {
    pub fn read_only(provider: InjectedProvider) -> Self {
        Self {
            provider,
            sender: None,
        }
    }

    pub fn for_sender(provider: InjectedProvider, sender: Account) -> Self {
        Self {
            provider,
            sender: Some(sender),
        }
    }

    /// `eth_call` against the contract, returning the raw ABI bytes.
    async fn call(&self, data: Vec<u8>) -> ProviderResult<Vec<u8>> {
        let params = InjectedProvider::json_params(&serde_json::json!([
            { "to": CONTRACT_ADDRESS, "data": hex::encode_prefixed(&data) },
            "latest",
        ]))?;
        let raw = self
            .provider
            .request("eth_call", Some(params))
            .await?
            .as_string()
            .ok_or_else(|| ProviderError::Decode("eth_call result is not a string".into()))?;
        hex::decode(&raw).map_err(|err| ProviderError::Decode(format!("eth_call result: {err}")))
    }

    /// Submit a state-changing call and block until it is mined.
    async fn send_tx(&self, data: Vec<u8>, value: Option<U256>) -> ProviderResult<TxReceipt> {
        let sender = self.sender.as_ref().ok_or_else(|| {
            ProviderError::Transport("no sender account bound to the contract handle".into())
        })?;

        let mut tx = serde_json::json!({
            "from": sender.0.as_str(),
            "to": CONTRACT_ADDRESS,
            "data": hex::encode_prefixed(&data),
        });
        if let Some(value) = value {
            tx["value"] = serde_json::Value::String(format!("0x{value:x}"));
        }

        let params = InjectedProvider::json_params(&serde_json::Value::Array(vec![tx]))?;
        let hash = self
            .provider
            .request("eth_sendTransaction", Some(params))
            .await?
            .as_string()
            .ok_or_else(|| ProviderError::Decode("transaction hash is not a string".into()))?;

        self.wait_for_receipt(hash).await
    }

    async fn wait_for_receipt(&self, hash: String) -> ProviderResult<TxReceipt> {
        for _ in 0..RECEIPT_POLL_LIMIT {
            let params = InjectedProvider::json_params(&serde_json::json!([hash.as_str()]))?;
            let receipt = self
                .provider
                .request("eth_getTransactionReceipt", Some(params))
                .await?;
            if !receipt.is_null() && !receipt.is_undefined() {
                return Ok(TxReceipt {
                    status: receipt_status(&receipt)?,
                    hash,
                });
            }
            sleep(Duration::from_millis(RECEIPT_POLL_MS)).await;
        }
        Err(ProviderError::Transport(format!(
            "transaction {hash} was not mined within the polling window"
        )))
    }
}

fn receipt_status(receipt: &JsValue) -> ProviderResult<u64> {
    let status = Reflect::get(receipt, &JsValue::from_str("status"))
        .ok()
        .and_then(|v| v.as_string())
        .ok_or_else(|| ProviderError::Decode("receipt has no status field".into()))?;
    u64::from_str_radix(status.trim_start_matches("0x"), 16)
        .map_err(|err| ProviderError::Decode(format!("receipt status '{status}': {err}")))
}

#[async_trait(?Send)]
impl NameRegistry for NameServiceContract {
    async fn register(&self, name: &str, fee_wei: U256) -> ProviderResult<TxReceipt> {
        let data = registerCall {
            name: name.to_owned(),
        }
        .abi_encode();
        self.send_tx(data, Some(fee_wei)).await
    }

    async fn set_record(&self, name: &str, record: &str) -> ProviderResult<TxReceipt> {
        let data = setRecordCall {
            name: name.to_owned(),
            record: record.to_owned(),
        }
        .abi_encode();
        self.send_tx(data, None).await
    }

    async fn all_names(&self) -> ProviderResult<Vec<String>> {
        let bytes = self.call(getAllNamesCall {}.abi_encode()).await?;
        let decoded = getAllNamesCall::abi_decode_returns(&bytes, true)
            .map_err(|err| ProviderError::Decode(format!("getAllNames: {err}")))?;
        Ok(decoded.names)
    }

    async fn record_of(&self, name: &str) -> ProviderResult<String> {
        let bytes = self
            .call(
                recordsCall {
                    name: name.to_owned(),
                }
                .abi_encode(),
            )
            .await?;
        let decoded = recordsCall::abi_decode_returns(&bytes, true)
            .map_err(|err| ProviderError::Decode(format!("records: {err}")))?;
        Ok(decoded.record)
    }

    async fn owner_of(&self, name: &str) -> ProviderResult<Account> {
        let bytes = self
            .call(
                domainsCall {
                    name: name.to_owned(),
                }
                .abi_encode(),
            )
            .await?;
        let decoded = domainsCall::abi_decode_returns(&bytes, true)
            .map_err(|err| ProviderError::Decode(format!("domains: {err}")))?;
        Ok(Account(decoded.owner.to_string()))
    }
}

// ── Factories ──

/// Registrar over the injected wallet, for reads and session management.
pub fn registrar() -> ProviderResult<Registrar<InjectedProvider, NameServiceContract>> {
    let wallet = InjectedProvider::from_window()?;
    let registry = NameServiceContract::read_only(wallet.clone());
    Ok(Registrar::new(wallet, registry))
}

/// Registrar whose writes are signed by `sender`.
pub fn registrar_for(
    sender: &Account,
) -> ProviderResult<Registrar<InjectedProvider, NameServiceContract>> {
    let wallet = InjectedProvider::from_window()?;
    let registry = NameServiceContract::for_sender(wallet.clone(), sender.clone());
    Ok(Registrar::new(wallet, registry))
}
