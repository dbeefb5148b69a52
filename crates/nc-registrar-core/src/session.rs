//! Session, pending-entry and phase state.
//!
//! All three are plain value records: transitions return a new value instead
//! of mutating in place, and the UI stores the latest value wholesale. The
//! rendering branch is derived, never stored.

use crate::networks;
use nc_api_types::{Account, ChainHex};

/// What the app knows about the wallet connection. Rebuilt from provider
/// responses; discarded on page unload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub account: Option<Account>,
    pub chain: Option<ChainHex>,
}

impl Session {
    pub fn with_account(self, account: Option<Account>) -> Session {
        Session { account, ..self }
    }

    pub fn with_chain(self, chain: ChainHex) -> Session {
        Session {
            chain: Some(chain),
            ..self
        }
    }

    /// Display name of the connected network, when it is a known one.
    pub fn network_name(&self) -> Option<&'static str> {
        self.chain.as_ref().and_then(networks::network_name)
    }

    pub fn on_required_network(&self) -> bool {
        self.chain
            .as_ref()
            .is_some_and(|chain| chain.0 == networks::REQUIRED_CHAIN_HEX)
    }

    /// Whether `account` owns the given mint, ignoring address casing.
    pub fn owns(&self, owner: &Account) -> bool {
        self.account
            .as_ref()
            .is_some_and(|account| account.matches(owner))
    }
}

/// The name and record text currently being composed. At most one is active;
/// a successful write replaces it with `cleared()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingEntry {
    pub name: String,
    pub record: String,
}

impl PendingEntry {
    pub fn cleared() -> PendingEntry {
        PendingEntry::default()
    }

    pub fn with_name(self, name: impl Into<String>) -> PendingEntry {
        PendingEntry {
            name: name.into(),
            ..self
        }
    }

    pub fn with_record(self, record: impl Into<String>) -> PendingEntry {
        PendingEntry {
            record: record.into(),
            ..self
        }
    }

    /// Entry for editing an existing mint: the name is fixed, the record
    /// starts empty.
    pub fn for_edit(name: impl Into<String>) -> PendingEntry {
        PendingEntry {
            name: name.into(),
            record: String::new(),
        }
    }
}

/// The UI branch currently rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Disconnected,
    WrongNetwork,
    Browsing,
    Editing,
}

/// Derive the rendering branch from the session and the editing flag.
pub fn phase(session: &Session, editing: bool) -> Phase {
    if session.account.is_none() {
        Phase::Disconnected
    } else if !session.on_required_network() {
        Phase::WrongNetwork
    } else if editing {
        Phase::Editing
    } else {
        Phase::Browsing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::networks::required_chain;

    fn account(addr: &str) -> Account {
        Account(addr.to_owned())
    }

    #[test]
    fn phase_starts_disconnected() {
        assert_eq!(phase(&Session::default(), false), Phase::Disconnected);
    }

    #[test]
    fn connected_session_on_foreign_chain_is_wrong_network() {
        let session = Session::default()
            .with_account(Some(account("0xabc")))
            .with_chain(ChainHex("0x1".into()));
        assert_eq!(phase(&session, false), Phase::WrongNetwork);
        assert_eq!(session.network_name(), Some("Mainnet"));
    }

    #[test]
    fn required_chain_unlocks_browsing_and_editing() {
        let session = Session::default()
            .with_account(Some(account("0xabc")))
            .with_chain(required_chain());
        assert_eq!(phase(&session, false), Phase::Browsing);
        assert_eq!(phase(&session, true), Phase::Editing);
    }

    #[test]
    fn chain_alone_does_not_connect() {
        let session = Session::default().with_chain(required_chain());
        assert_eq!(phase(&session, true), Phase::Disconnected);
    }

    #[test]
    fn edit_entry_keeps_name_and_empties_record() {
        let entry = PendingEntry::default().with_name("mortal").with_record("gm");
        let editing = PendingEntry::for_edit(entry.name.clone());
        assert_eq!(editing.name, "mortal");
        assert_eq!(editing.record, "");
    }

    #[test]
    fn ownership_ignores_address_casing() {
        let session = Session::default().with_account(Some(account("0xAbCd")));
        assert!(session.owns(&account("0xabcd")));
        assert!(!session.owns(&account("0xabce")));
        assert!(!Session::default().owns(&account("0xabcd")));
    }
}
