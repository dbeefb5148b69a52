//! Mint and record-update flows.
//!
//! Each handler marshals form input into a `PendingEntry`, drives the
//! corresponding `Registrar` flow, and re-renders. Failures follow the error
//! taxonomy: absent provider prompts, reverted registrations alert, wallet
//! rejections are logged only.

use crate::contract;
use crate::dom::{self, Elements};
use crate::mint_list;
use crate::state;
use crate::view;
use gloo_console::{error, log, warn};
use gloo_timers::future::{TimeoutFuture, sleep};
use nc_chain_client::ProviderError;
use nc_registrar_core::{MintError, MintOutcome, PendingEntry};
use std::time::Duration;

const INSTALL_PROMPT: &str = "Get MetaMask -> https://metamask.io/";

fn pending_from_inputs(els: &Elements) -> PendingEntry {
    PendingEntry::default()
        .with_name(dom::get_input_value(&els.domain_input))
        .with_record(dom::get_input_value(&els.record_input))
}

fn clear_entry(els: &Elements) {
    state::set_pending(PendingEntry::cleared());
    dom::set_input_value(&els.domain_input, "");
    dom::set_input_value(&els.record_input, "");
}

fn settle(ms: u32) -> TimeoutFuture {
    sleep(Duration::from_millis(u64::from(ms)))
}

/// Request account access from the injected wallet.
pub async fn on_connect(els: &Elements) {
    let registrar = match contract::registrar() {
        Ok(registrar) => registrar,
        Err(ProviderError::Unavailable) => {
            dom::alert(INSTALL_PROMPT);
            return;
        }
        Err(err) => {
            error!(format!("provider lookup failed: {err}"));
            return;
        }
    };

    match registrar.connect().await {
        Ok(session) => {
            state::set_session(session);
            view::render(els);
            mint_list::refresh_if_ready(els).await;
        }
        // Covers declined prompts; the connect button stays available.
        Err(err) => error!(format!("wallet connect failed: {err}")),
    }
}

/// Register the composed name and attach its record.
pub async fn on_mint(els: &Elements) {
    let entry = pending_from_inputs(els);
    state::set_pending(entry.clone());
    let Some(account) = state::session().account else {
        return;
    };
    let registrar = match contract::registrar_for(&account) {
        Ok(registrar) => registrar,
        Err(err) => {
            error!(format!("provider lookup failed: {err}"));
            return;
        }
    };

    match registrar.mint(&entry).await {
        Ok(MintOutcome::Minted { register, .. }) => {
            log!(format!("'{}' minted in {}", entry.name, register.hash));
            match registrar.fetch_mints_after_write(&entry.name, settle).await {
                Ok(mints) => state::set_mints(mints),
                Err(err) => warn!(format!("listing refresh failed: {err}")),
            }
            clear_entry(els);
        }
        Ok(MintOutcome::Reverted(receipt)) => {
            warn!(format!("registration reverted in {}", receipt.hash));
            dom::alert("Transaction failed! Please try again");
        }
        Err(MintError::EmptyName) => {}
        Err(MintError::NameTooShort) => dom::alert("Domain must be at least 3 characters long"),
        Err(err) => error!(format!("mint failed: {err}")),
    }

    view::render(els);
}

/// Replace the record of the name being edited.
pub async fn on_update(els: &Elements) {
    if state::busy() {
        return;
    }
    let entry = pending_from_inputs(els);
    if entry.name.is_empty() || entry.record.is_empty() {
        return;
    }
    state::set_pending(entry.clone());
    let Some(account) = state::session().account else {
        return;
    };
    let registrar = match contract::registrar_for(&account) {
        Ok(registrar) => registrar,
        Err(err) => {
            error!(format!("provider lookup failed: {err}"));
            return;
        }
    };

    state::set_busy(true);
    view::render(els);

    match registrar.update_record(&entry).await {
        Ok(receipt) => {
            log!(format!("record for '{}' set in {}", entry.name, receipt.hash));
            match registrar.fetch_mints().await {
                Ok(mints) => state::set_mints(mints),
                Err(err) => warn!(format!("listing refresh failed: {err}")),
            }
            clear_entry(els);
            state::set_editing(false);
        }
        Err(err) => error!(format!("record update failed: {err}")),
    }

    // Released whatever happened above.
    state::set_busy(false);
    view::render(els);
}

/// Start editing an existing mint: its name is fixed, the record starts
/// fresh.
pub fn on_edit_record(els: &Elements, name: &str) {
    log!(format!("editing record for '{name}'"));
    state::set_editing(true);
    state::set_pending(PendingEntry::for_edit(name));
    dom::set_input_value(&els.domain_input, name);
    dom::set_input_value(&els.record_input, "");
    view::render(els);
}

/// Leave editing mode without submitting anything.
pub fn on_cancel_edit(els: &Elements) {
    state::set_editing(false);
    view::render(els);
}
