//! Injected wallet provider bridge.
//!
//! Wraps the EIP-1193 object browser wallets inject at `window.ethereum`:
//! every interaction funnels through its `request({ method, params })`
//! entry point, reached via `js-sys` reflection. Implements `WalletBridge`
//! so the flows in `nc-registrar-core` never see a `JsValue`.

use async_trait::async_trait;
use js_sys::{Function, Promise, Reflect};
use nc_api_types::{Account, ChainHex, ChainParams};
use nc_chain_client::{ProviderError, ProviderResult, WalletBridge};
use serde::ser::Serialize as _;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// Handle to the injected provider object. Cheap to clone; the underlying
/// object is owned by the JS side.
#[derive(Clone)]
pub struct InjectedProvider {
    ethereum: JsValue,
}

impl InjectedProvider {
    /// Resolve `window.ethereum`, or report that no wallet is installed.
    pub fn from_window() -> ProviderResult<Self> {
        let window = web_sys::window().ok_or(ProviderError::Unavailable)?;
        let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum"))
            .map_err(|_| ProviderError::Unavailable)?;
        if ethereum.is_undefined() || ethereum.is_null() {
            return Err(ProviderError::Unavailable);
        }
        Ok(Self { ethereum })
    }

    /// Serialize JSON-RPC params into a plain JS array/object. The provider
    /// rejects ES Maps, so the json-compatible serializer is required.
    pub fn json_params(params: &serde_json::Value) -> ProviderResult<JsValue> {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        params
            .serialize(&serializer)
            .map_err(|err| ProviderError::Decode(format!("params serialization: {err}")))
    }

    /// Perform `ethereum.request({ method, params })` and await the promise.
    pub async fn request(&self, method: &str, params: Option<JsValue>) -> ProviderResult<JsValue> {
        self.request_for_chain(method, params, None).await
    }

    /// Like `request`, but tags rejections with the chain being asked for so
    /// the unrecognized-chain code can be classified.
    pub async fn request_for_chain(
        &self,
        method: &str,
        params: Option<JsValue>,
        requested_chain: Option<&ChainHex>,
    ) -> ProviderResult<JsValue> {
        let payload = js_sys::Object::new();
        Reflect::set(
            &payload,
            &JsValue::from_str("method"),
            &JsValue::from_str(method),
        )
        .map_err(|_| ProviderError::Transport("building request payload".into()))?;
        if let Some(params) = params {
            Reflect::set(&payload, &JsValue::from_str("params"), &params)
                .map_err(|_| ProviderError::Transport("building request payload".into()))?;
        }

        let request_fn = Reflect::get(&self.ethereum, &JsValue::from_str("request"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or_else(|| ProviderError::Transport("provider has no request method".into()))?;

        let promise: Promise = request_fn
            .call1(&self.ethereum, &payload)
            .map_err(|err| classify(err, requested_chain))?
            .dyn_into()
            .map_err(|_| ProviderError::Transport(format!("{method} did not return a promise")))?;

        JsFuture::from(promise)
            .await
            .map_err(|err| classify(err, requested_chain))
    }

    /// Subscribe to the provider's `chainChanged` notification.
    pub fn on_chain_changed(&self, callback: impl FnMut(JsValue) + 'static) {
        let Some(on_fn) = Reflect::get(&self.ethereum, &JsValue::from_str("on"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
        else {
            // Not every provider is an event emitter; without the
            // notification the user just reloads by hand after switching.
            return;
        };

        let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut(JsValue)>);
        let _ = on_fn.call2(
            &self.ethereum,
            &JsValue::from_str("chainChanged"),
            closure.as_ref(),
        );
        closure.forget();
    }
}

/// Map a rejected `request` promise onto the error taxonomy. EIP-1193 errors
/// carry a numeric `code` and a `message`; anything else is transport noise.
fn classify(err: JsValue, requested_chain: Option<&ChainHex>) -> ProviderError {
    let code = Reflect::get(&err, &JsValue::from_str("code"))
        .ok()
        .and_then(|v| v.as_f64())
        .map(|v| v as i64);
    let message = Reflect::get(&err, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| format!("{err:?}"));

    match code {
        Some(code) => ProviderError::from_rpc(code, message, requested_chain),
        None => ProviderError::Transport(message),
    }
}

fn accounts_from(value: JsValue) -> ProviderResult<Vec<Account>> {
    let addresses: Vec<String> = serde_wasm_bindgen::from_value(value)
        .map_err(|err| ProviderError::Decode(format!("accounts response: {err}")))?;
    Ok(addresses.into_iter().map(Account).collect())
}

#[async_trait(?Send)]
impl WalletBridge for InjectedProvider {
    async fn authorized_accounts(&self) -> ProviderResult<Vec<Account>> {
        accounts_from(self.request("eth_accounts", None).await?)
    }

    async fn request_accounts(&self) -> ProviderResult<Vec<Account>> {
        accounts_from(self.request("eth_requestAccounts", None).await?)
    }

    async fn chain_id(&self) -> ProviderResult<ChainHex> {
        self.request("eth_chainId", None)
            .await?
            .as_string()
            .map(ChainHex)
            .ok_or_else(|| ProviderError::Decode("chain id is not a string".into()))
    }

    async fn switch_chain(&self, chain: &ChainHex) -> ProviderResult<()> {
        let params = Self::json_params(&serde_json::json!([{ "chainId": chain.0.as_str() }]))?;
        self.request_for_chain("wallet_switchEthereumChain", Some(params), Some(chain))
            .await?;
        Ok(())
    }

    async fn add_chain(&self, params: &ChainParams) -> ProviderResult<()> {
        let value = serde_json::to_value(params)
            .map_err(|err| ProviderError::Decode(format!("chain params: {err}")))?;
        let params = Self::json_params(&serde_json::Value::Array(vec![value]))?;
        self.request("wallet_addEthereumChain", Some(params)).await?;
        Ok(())
    }
}
