//! Network guard UI.
//!
//! The switch action drives the add-then-retry remediation in the core flow;
//! a successful switch fires the provider's `chainChanged` notification,
//! which reloads the page so the whole session is re-detected.

use crate::contract;
use crate::dom::{self, Elements};
use crate::provider::InjectedProvider;
use gloo_console::{error, log};
use nc_chain_client::ProviderError;

const INSTALL_PROMPT: &str =
    "MetaMask is not installed. Please install it to use this app: https://metamask.io/download.html";

/// Ask the wallet to move to the supported network.
pub async fn on_switch_network(_els: &Elements) {
    match contract::registrar() {
        Ok(registrar) => {
            if let Err(err) = registrar.ensure_required_network().await {
                // Declined switches stay on the prompt for another try.
                error!(format!("network switch failed: {err}"));
            }
        }
        Err(ProviderError::Unavailable) => dom::alert(INSTALL_PROMPT),
        Err(err) => error!(format!("provider lookup failed: {err}")),
    }
}

/// Reload on chain changes so every flow restarts against the new network.
pub fn subscribe_chain_changed() {
    let Ok(provider) = InjectedProvider::from_window() else {
        return;
    };
    provider.on_chain_changed(|chain| {
        log!(format!(
            "chain changed to {}, reloading",
            chain.as_string().unwrap_or_else(|| "<unknown>".into())
        ));
        let _ = dom::window().location().reload();
    });
}
