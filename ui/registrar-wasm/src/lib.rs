//! NameCortex Registrar WASM Frontend
//!
//! Pure Rust + WASM single-page front end for the NameCortex name service.
//! Modularised for extensibility: each concern lives in its own module.

pub mod contract;
pub mod dom;
pub mod events;
pub mod mint_list;
pub mod mint_ops;
pub mod network;
pub mod provider;
pub mod state;
pub mod view;

use gloo_console::{log, warn};
use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init().await
}

/// Main initialisation sequence: resolve the DOM, detect an existing wallet
/// authorization, wire events, and fetch the listing when the session is
/// already on the supported network.
async fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;

    match contract::registrar() {
        Ok(registrar) => {
            match registrar.detect_session().await {
                Ok(session) => {
                    log!(format!(
                        "detected session: account={:?} network={:?}",
                        session.account, session.network_name()
                    ));
                    state::set_session(session);
                }
                Err(err) => warn!(format!("session detection failed: {err}")),
            }
            network::subscribe_chain_changed();
        }
        // No provider at load is fine; the connect action explains what to do.
        Err(err) => log!(format!("no provider at startup: {err}")),
    }

    events::bind_events(&els);
    view::render(&els);
    mint_list::refresh_if_ready(&els).await;

    Ok(())
}
