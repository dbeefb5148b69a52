//! Global application state.
//!
//! Uses a `RefCell`-wrapped `thread_local!` singleton (WASM is
//! single-threaded). The state holds the latest value records from
//! `nc-registrar-core`; transitions replace them wholesale. Nothing is
//! persisted — every read comes back from the chain on demand.

use nc_api_types::MintRecord;
use nc_registrar_core::session::{self, PendingEntry, Phase, Session};
use std::cell::RefCell;

/// Central application state.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub session: Session,
    pub pending: PendingEntry,
    pub mints: Vec<MintRecord>,
    pub editing: bool,
    pub busy: bool,
}

// ── Thread-local singleton ──

thread_local! {
    static STATE: RefCell<AppState> = RefCell::new(AppState::default());
}

/// Run a closure with shared read access to the state.
pub fn with<F, R>(f: F) -> R
where
    F: FnOnce(&AppState) -> R,
{
    STATE.with(|s| f(&s.borrow()))
}

/// Run a closure with mutable access to the state.
pub fn with_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut AppState) -> R,
{
    STATE.with(|s| f(&mut s.borrow_mut()))
}

// ── Convenience accessors ──

pub fn session() -> Session {
    with(|s| s.session.clone())
}

pub fn set_session(session: Session) {
    with_mut(|s| s.session = session);
}

pub fn pending() -> PendingEntry {
    with(|s| s.pending.clone())
}

pub fn set_pending(pending: PendingEntry) {
    with_mut(|s| s.pending = pending);
}

pub fn mints() -> Vec<MintRecord> {
    with(|s| s.mints.clone())
}

pub fn set_mints(mints: Vec<MintRecord>) {
    with_mut(|s| s.mints = mints);
}

pub fn editing() -> bool {
    with(|s| s.editing)
}

pub fn set_editing(editing: bool) {
    with_mut(|s| s.editing = editing);
}

pub fn busy() -> bool {
    with(|s| s.busy)
}

pub fn set_busy(busy: bool) {
    with_mut(|s| s.busy = busy);
}

/// The rendering branch derived from the current session and editing flag.
pub fn phase() -> Phase {
    with(|s| session::phase(&s.session, s.editing))
}
