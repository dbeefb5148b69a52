//! Mint list rendering.
//!
//! Renders one card per registered name and wires the per-card edit buttons.
//! The list is replaced wholesale on every refresh; a failed read keeps
//! whatever was rendered before.

use crate::contract;
use crate::dom::{self, Elements};
use crate::state;
use gloo_console::warn;
use nc_registrar_core::session::Phase;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Display suffix for registered names.
pub const TLD: &str = ".cortex";

const MARKETPLACE_BASE: &str = "https://testnets.opensea.io/assets/mumbai";

/// Fetch the listing from the contract and re-render.
pub async fn refresh(els: &Elements) {
    match contract::registrar() {
        Ok(registrar) => match registrar.fetch_mints().await {
            Ok(mints) => state::set_mints(mints),
            Err(err) => warn!(format!("mint listing fetch failed: {err}")),
        },
        Err(err) => warn!(format!("provider lookup failed: {err}")),
    }
    render(els);
}

/// Refresh only once the session has an account on the supported network.
pub async fn refresh_if_ready(els: &Elements) {
    if matches!(state::phase(), Phase::Browsing | Phase::Editing) {
        refresh(els).await;
    }
}

/// Render mint cards into the list container.
pub fn render(els: &Elements) {
    let session = state::session();
    let mints = state::mints();

    let visible = session.account.is_some() && !mints.is_empty();
    dom::set_hidden(&els.mint_container, !visible);
    dom::set_inner_html(&els.mint_list, "");
    if !visible {
        return;
    }

    for mint in &mints {
        let card = dom::create_element("div");
        card.set_attribute("class", "mint-item").unwrap();

        let edit_btn = if session.owns(&mint.owner) {
            format!(
                r#"<button class="edit-button" data-name="{}" title="Edit record">&#9998;</button>"#,
                mint.name
            )
        } else {
            String::new()
        };

        let html = format!(
            r#"
            <div class="mint-row">
              <a class="link" href="{MARKETPLACE_BASE}/{}/{}" target="_blank" rel="noopener noreferrer">
                <p class="underlined">{}{TLD}</p>
              </a>
              {}
            </div>
            <p>{}</p>
            "#,
            contract::CONTRACT_ADDRESS,
            mint.id,
            mint.name,
            edit_btn,
            mint.record,
        );

        dom::set_inner_html(&card, &html);
        els.mint_list.append_child(&card).unwrap();
    }

    wire_edit_buttons(els);
}

/// Wire click events on dynamically-created edit buttons.
fn wire_edit_buttons(els: &Elements) {
    for btn in dom::query_all_within(&els.mint_list, ".edit-button") {
        let name = btn.get_attribute("data-name").unwrap_or_default();
        let els2 = els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            crate::mint_ops::on_edit_record(&els2, &name);
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }
}
