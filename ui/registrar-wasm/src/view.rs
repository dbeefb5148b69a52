//! Per-phase rendering.
//!
//! One of four branches is visible at a time, derived from the session and
//! the editing flag. Rendering only toggles visibility and badge text; the
//! form fields are written explicitly by the edit/clear transitions so user
//! input is never clobbered mid-keystroke.

use crate::dom::{self, Elements};
use crate::mint_list;
use crate::state;
use nc_registrar_core::session::Phase;

pub fn render(els: &Elements) {
    let session = state::session();
    let phase = state::phase();

    match &session.account {
        Some(account) => dom::set_text(
            &els.wallet_badge,
            &format!("Wallet: {}", shorten(&account.0, 6, 4)),
        ),
        None => dom::set_text(&els.wallet_badge, "Not connected"),
    }
    dom::set_text(
        &els.network_badge,
        session.network_name().unwrap_or("\u{2014}"),
    );

    dom::set_hidden(&els.connect_container, phase != Phase::Disconnected);
    dom::set_hidden(&els.switch_container, phase != Phase::WrongNetwork);
    dom::set_hidden(
        &els.form_container,
        !matches!(phase, Phase::Browsing | Phase::Editing),
    );

    let editing = phase == Phase::Editing;
    dom::set_hidden(&els.mint_btn, editing);
    dom::set_hidden(&els.update_btn, !editing);
    dom::set_hidden(&els.cancel_btn, !editing);

    let busy = state::busy();
    els.mint_btn.set_disabled(busy);
    els.update_btn.set_disabled(busy);

    mint_list::render(els);
}

fn shorten(s: &str, head: usize, tail: usize) -> String {
    if s.len() <= head + tail + 1 {
        s.to_string()
    } else {
        format!("{}\u{2026}{}", &s[..head], &s[s.len() - tail..])
    }
}
