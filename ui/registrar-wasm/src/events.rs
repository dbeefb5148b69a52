//! Event binding.
//!
//! Wires all UI event listeners. To add new events, add closures here and
//! (if async) spawn via `wasm_bindgen_futures::spawn_local`.

use crate::dom::{self, Elements};
use crate::mint_ops;
use crate::network;
use crate::state;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Helper: attach async click handler.
macro_rules! on_click_async {
    ($el:expr, $els:expr, $handler:expr) => {{
        let els = $els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let els2 = els.clone();
            wasm_bindgen_futures::spawn_local(async move {
                $handler(&els2).await;
            });
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }};
}

/// Helper: attach sync click handler.
macro_rules! on_click {
    ($el:expr, $cb:expr) => {{
        let cb = Closure::wrap(Box::new($cb) as Box<dyn FnMut(web_sys::MouseEvent)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }};
}

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(els: &Elements) {
    // ── Wallet / network ──
    on_click_async!(els.connect_btn, els, mint_ops::on_connect);
    on_click_async!(els.switch_btn, els, network::on_switch_network);

    // ── Mint / update ──
    on_click_async!(els.mint_btn, els, mint_ops::on_mint);
    on_click_async!(els.update_btn, els, mint_ops::on_update);
    {
        let els2 = els.clone();
        on_click!(els.cancel_btn, move |_: web_sys::MouseEvent| {
            mint_ops::on_cancel_edit(&els2);
        });
    }

    // ── Keep the pending entry in step with the form ──
    {
        let els2 = els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            let name = dom::get_input_value(&els2.domain_input);
            state::set_pending(state::pending().with_name(name));
        }) as Box<dyn FnMut(_)>);
        els.domain_input
            .add_event_listener_with_callback("input", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }
    {
        let els2 = els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            let record = dom::get_input_value(&els2.record_input);
            state::set_pending(state::pending().with_record(record));
        }) as Box<dyn FnMut(_)>);
        els.record_input
            .add_event_listener_with_callback("input", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }
}
