//! The four asynchronous flows behind the UI: connect, network guard,
//! mint/update, and the mint listing.
//!
//! `Registrar` is generic over the `nc-chain-client` traits so the flows run
//! unchanged against the browser provider and against in-memory fakes.

use std::future::Future;

use nc_api_types::MintRecord;
use nc_chain_client::{NameRegistry, ProviderError, ProviderResult, TxReceipt, WalletBridge};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::networks::{required_chain, required_chain_params};
use crate::pricing::FeeTier;
use crate::session::{PendingEntry, Session};

/// Backoff schedule for re-reading the listing after a write, replacing a
/// fixed settle delay: the read path lags confirmation by an unspecified
/// indexing latency.
const INDEX_BACKOFF_MS: [u32; 4] = [500, 1_000, 2_000, 4_000];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MintError {
    #[error("domain name is required")]
    EmptyName,
    #[error("domain name must be at least 3 characters long")]
    NameTooShort,
    #[error("record text is required")]
    EmptyRecord,
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Result of a registration attempt that produced at least one receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintOutcome {
    /// Registration confirmed and the record attached, in that order.
    Minted {
        register: TxReceipt,
        record: TxReceipt,
    },
    /// Registration mined but reverted; no record transaction was sent and
    /// the composed entry should be kept for a retry.
    Reverted(TxReceipt),
}

pub struct Registrar<W, N> {
    wallet: W,
    registry: N,
}

impl<W: WalletBridge, N: NameRegistry> Registrar<W, N> {
    pub fn new(wallet: W, registry: N) -> Self {
        Self { wallet, registry }
    }

    /// Session as it stands at page load: already-authorized account (if
    /// any) plus the wallet's current chain. Never prompts.
    pub async fn detect_session(&self) -> ProviderResult<Session> {
        let accounts = self.wallet.authorized_accounts().await?;
        let chain = self.wallet.chain_id().await?;
        Ok(Session {
            account: accounts.into_iter().next(),
            chain: Some(chain),
        })
    }

    /// Ask the wallet for account access. May open the wallet's own
    /// permission UI; a refusal surfaces as `ProviderError::Rejected`.
    pub async fn connect(&self) -> ProviderResult<Session> {
        let accounts = self.wallet.request_accounts().await?;
        let chain = self.wallet.chain_id().await?;
        let session = Session {
            account: accounts.into_iter().next(),
            chain: Some(chain),
        };
        if let Some(account) = &session.account {
            info!("connected account {}", account);
        }
        Ok(session)
    }

    /// Switch the wallet to the supported network. When the wallet does not
    /// know the chain (code 4902) its connection parameters are registered
    /// first and the switch is retried once.
    pub async fn ensure_required_network(&self) -> ProviderResult<()> {
        let chain = required_chain();
        match self.wallet.switch_chain(&chain).await {
            Ok(()) => Ok(()),
            Err(ProviderError::UnrecognizedChain(_)) => {
                info!("wallet is missing chain {}, registering it", chain);
                self.wallet.add_chain(&required_chain_params()).await?;
                self.wallet.switch_chain(&chain).await
            }
            Err(err) => Err(err),
        }
    }

    /// Register `entry.name` and attach `entry.record` to it.
    ///
    /// The record transaction is only sent once the registration receipt
    /// reports success; a reverted registration is returned as an outcome so
    /// the caller can keep the composed entry.
    pub async fn mint(&self, entry: &PendingEntry) -> Result<MintOutcome, MintError> {
        if entry.name.is_empty() {
            return Err(MintError::EmptyName);
        }
        let tier = FeeTier::for_name(&entry.name).ok_or(MintError::NameTooShort)?;

        info!(
            "registering '{}' with a {} MATIC fee",
            entry.name,
            tier.display()
        );
        let register = self.registry.register(&entry.name, tier.wei()).await?;
        if !register.succeeded() {
            warn!("registration of '{}' reverted in {}", entry.name, register.hash);
            return Ok(MintOutcome::Reverted(register));
        }
        info!("'{}' minted in {}", entry.name, register.hash);

        let record = self.registry.set_record(&entry.name, &entry.record).await?;
        info!("record for '{}' set in {}", entry.name, record.hash);
        Ok(MintOutcome::Minted { register, record })
    }

    /// Replace the record attached to an existing name.
    pub async fn update_record(&self, entry: &PendingEntry) -> Result<TxReceipt, MintError> {
        if entry.name.is_empty() {
            return Err(MintError::EmptyName);
        }
        if entry.record.is_empty() {
            return Err(MintError::EmptyRecord);
        }

        info!("updating record of '{}'", entry.name);
        let receipt = self.registry.set_record(&entry.name, &entry.record).await?;
        info!("record for '{}' set in {}", entry.name, receipt.hash);
        Ok(receipt)
    }

    /// Fetch the full listing: every registered name with its record and
    /// owner. Record and owner are fetched concurrently per name and the
    /// result keeps the order of the name list; ids are list positions.
    pub async fn fetch_mints(&self) -> ProviderResult<Vec<MintRecord>> {
        let names = self.registry.all_names().await?;
        let lookups = names.iter().map(|name| async move {
            futures::future::try_join(self.registry.record_of(name), self.registry.owner_of(name))
                .await
        });
        let details = futures::future::try_join_all(lookups).await?;

        Ok(names
            .into_iter()
            .zip(details)
            .enumerate()
            .map(|(id, (name, (record, owner)))| MintRecord {
                id,
                name,
                record,
                owner,
            })
            .collect())
    }

    /// Refresh the listing after a write, polling until the freshly written
    /// name shows up in the read path or the backoff schedule is exhausted.
    /// Always ends with a fetch so callers render the newest view available.
    pub async fn fetch_mints_after_write<F, Fut>(
        &self,
        name: &str,
        mut sleep: F,
    ) -> ProviderResult<Vec<MintRecord>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = ()>,
    {
        for delay_ms in INDEX_BACKOFF_MS {
            match self.fetch_mints().await {
                Ok(mints) if mints.iter().any(|m| m.name == name) => return Ok(mints),
                Ok(_) => debug!("'{}' not indexed yet, retrying in {}ms", name, delay_ms),
                Err(err) => warn!("listing refresh failed while waiting for '{}': {}", name, err),
            }
            sleep(delay_ms).await;
        }
        self.fetch_mints().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::networks::{REQUIRED_CHAIN_HEX, REQUIRED_NETWORK_NAME};
    use crate::session::{Phase, phase};
    use alloy_primitives::U256;
    use async_trait::async_trait;
    use nc_api_types::{Account, ChainHex, ChainParams};
    use nc_chain_client::UNRECOGNIZED_CHAIN_CODE;
    use std::cell::RefCell;
    use std::collections::HashMap;

    // ── Fakes ──

    struct FakeWallet {
        authorized: Vec<Account>,
        granted: ProviderResult<Vec<Account>>,
        chain: ChainHex,
        /// One scripted outcome per switch attempt; exhausted means Ok.
        switch_script: RefCell<Vec<ProviderResult<()>>>,
        switches: RefCell<u32>,
        added: RefCell<Vec<ChainParams>>,
    }

    impl FakeWallet {
        fn on_chain(chain: &str) -> Self {
            Self {
                authorized: Vec::new(),
                granted: Ok(vec![Account("0xF00".into())]),
                chain: ChainHex(chain.into()),
                switch_script: RefCell::new(Vec::new()),
                switches: RefCell::new(0),
                added: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl WalletBridge for FakeWallet {
        async fn authorized_accounts(&self) -> ProviderResult<Vec<Account>> {
            Ok(self.authorized.clone())
        }

        async fn request_accounts(&self) -> ProviderResult<Vec<Account>> {
            self.granted.clone()
        }

        async fn chain_id(&self) -> ProviderResult<ChainHex> {
            Ok(self.chain.clone())
        }

        async fn switch_chain(&self, _chain: &ChainHex) -> ProviderResult<()> {
            *self.switches.borrow_mut() += 1;
            let mut script = self.switch_script.borrow_mut();
            if script.is_empty() {
                Ok(())
            } else {
                script.remove(0)
            }
        }

        async fn add_chain(&self, params: &ChainParams) -> ProviderResult<()> {
            self.added.borrow_mut().push(params.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeRegistry {
        /// Successive `all_names` views; the last one repeats.
        listings: RefCell<Vec<Vec<String>>>,
        records: HashMap<String, String>,
        owners: HashMap<String, String>,
        register_status: u64,
        read_failure: Option<ProviderError>,
        register_calls: RefCell<Vec<(String, U256)>>,
        set_record_calls: RefCell<Vec<(String, String)>>,
        call_log: RefCell<Vec<&'static str>>,
    }

    impl FakeRegistry {
        fn minted() -> Self {
            let mut registry = FakeRegistry {
                register_status: 1,
                ..FakeRegistry::default()
            };
            registry
                .listings
                .borrow_mut()
                .push(vec!["alpha".into(), "beta".into(), "gamma".into()]);
            for name in ["alpha", "beta", "gamma"] {
                registry
                    .records
                    .insert(name.into(), format!("record of {name}"));
                registry.owners.insert(name.into(), format!("0xowner-{name}"));
            }
            registry
        }
    }

    #[async_trait(?Send)]
    impl NameRegistry for FakeRegistry {
        async fn register(&self, name: &str, fee_wei: U256) -> ProviderResult<TxReceipt> {
            self.call_log.borrow_mut().push("register");
            self.register_calls
                .borrow_mut()
                .push((name.to_owned(), fee_wei));
            Ok(TxReceipt {
                hash: format!("0xreg-{name}"),
                status: self.register_status,
            })
        }

        async fn set_record(&self, name: &str, record: &str) -> ProviderResult<TxReceipt> {
            self.call_log.borrow_mut().push("set_record");
            self.set_record_calls
                .borrow_mut()
                .push((name.to_owned(), record.to_owned()));
            Ok(TxReceipt {
                hash: format!("0xrec-{name}"),
                status: 1,
            })
        }

        async fn all_names(&self) -> ProviderResult<Vec<String>> {
            if let Some(err) = &self.read_failure {
                return Err(err.clone());
            }
            let mut listings = self.listings.borrow_mut();
            if listings.len() > 1 {
                Ok(listings.remove(0))
            } else {
                Ok(listings.first().cloned().unwrap_or_default())
            }
        }

        async fn record_of(&self, name: &str) -> ProviderResult<String> {
            Ok(self.records.get(name).cloned().unwrap_or_default())
        }

        async fn owner_of(&self, name: &str) -> ProviderResult<Account> {
            Ok(Account(
                self.owners.get(name).cloned().unwrap_or_default(),
            ))
        }
    }

    // ── Mint flow ──

    #[tokio::test]
    async fn empty_name_never_reaches_the_contract() {
        let registrar = Registrar::new(FakeWallet::on_chain(REQUIRED_CHAIN_HEX), FakeRegistry::minted());
        let entry = PendingEntry::default().with_record("hi");

        let err = registrar.mint(&entry).await.unwrap_err();
        assert_eq!(err, MintError::EmptyName);
        assert!(registrar.registry.call_log.borrow().is_empty());
    }

    #[tokio::test]
    async fn short_name_is_refused_before_any_transaction() {
        let registrar = Registrar::new(FakeWallet::on_chain(REQUIRED_CHAIN_HEX), FakeRegistry::minted());
        let entry = PendingEntry::default().with_name("ab").with_record("hi");

        let err = registrar.mint(&entry).await.unwrap_err();
        assert_eq!(err, MintError::NameTooShort);
        assert!(registrar.registry.call_log.borrow().is_empty());
    }

    #[tokio::test]
    async fn successful_registration_is_followed_by_exactly_one_record_write() {
        let registrar = Registrar::new(FakeWallet::on_chain(REQUIRED_CHAIN_HEX), FakeRegistry::minted());
        let entry = PendingEntry::default().with_name("abc").with_record("gm");

        let outcome = registrar.mint(&entry).await.unwrap();
        assert!(matches!(outcome, MintOutcome::Minted { .. }));
        assert_eq!(
            *registrar.registry.call_log.borrow(),
            vec!["register", "set_record"]
        );
        assert_eq!(
            *registrar.registry.set_record_calls.borrow(),
            vec![("abc".to_owned(), "gm".to_owned())]
        );
    }

    #[tokio::test]
    async fn fee_follows_the_length_tier() {
        let registrar = Registrar::new(FakeWallet::on_chain(REQUIRED_CHAIN_HEX), FakeRegistry::minted());

        for (name, wei) in [
            ("abc", 500_000_000_000_000_000u64),
            ("abcd", 300_000_000_000_000_000),
            ("abcdef", 100_000_000_000_000_000),
        ] {
            let entry = PendingEntry::default().with_name(name).with_record("r");
            registrar.mint(&entry).await.unwrap();
            let (called_name, fee) = registrar.registry.register_calls.borrow().last().cloned().unwrap();
            assert_eq!(called_name, name);
            assert_eq!(fee, U256::from(wei));
        }
    }

    #[tokio::test]
    async fn reverted_registration_sends_no_record_transaction() {
        let registry = FakeRegistry {
            register_status: 0,
            ..FakeRegistry::minted()
        };
        let registrar = Registrar::new(FakeWallet::on_chain(REQUIRED_CHAIN_HEX), registry);
        let entry = PendingEntry::default().with_name("abc").with_record("gm");

        let outcome = registrar.mint(&entry).await.unwrap();
        assert!(matches!(outcome, MintOutcome::Reverted(receipt) if receipt.status == 0));
        assert_eq!(*registrar.registry.call_log.borrow(), vec!["register"]);
    }

    // ── Update flow ──

    #[tokio::test]
    async fn update_needs_both_name_and_record() {
        let registrar = Registrar::new(FakeWallet::on_chain(REQUIRED_CHAIN_HEX), FakeRegistry::minted());

        let missing_record = PendingEntry::default().with_name("abc");
        assert_eq!(
            registrar.update_record(&missing_record).await.unwrap_err(),
            MintError::EmptyRecord
        );

        let missing_name = PendingEntry::default().with_record("gm");
        assert_eq!(
            registrar.update_record(&missing_name).await.unwrap_err(),
            MintError::EmptyName
        );

        assert!(registrar.registry.call_log.borrow().is_empty());
    }

    #[tokio::test]
    async fn update_submits_a_single_record_write() {
        let registrar = Registrar::new(FakeWallet::on_chain(REQUIRED_CHAIN_HEX), FakeRegistry::minted());
        let entry = PendingEntry::default().with_name("alpha").with_record("new text");

        let receipt = registrar.update_record(&entry).await.unwrap();
        assert_eq!(receipt.hash, "0xrec-alpha");
        assert_eq!(*registrar.registry.call_log.borrow(), vec!["set_record"]);
    }

    // ── Listing ──

    #[tokio::test]
    async fn listing_preserves_order_and_positional_ids() {
        let registrar = Registrar::new(FakeWallet::on_chain(REQUIRED_CHAIN_HEX), FakeRegistry::minted());

        let mints = registrar.fetch_mints().await.unwrap();
        assert_eq!(mints.len(), 3);
        for (index, (mint, name)) in mints.iter().zip(["alpha", "beta", "gamma"]).enumerate() {
            assert_eq!(mint.id, index);
            assert_eq!(mint.name, name);
            assert_eq!(mint.record, format!("record of {name}"));
            assert_eq!(mint.owner.0, format!("0xowner-{name}"));
        }
    }

    #[tokio::test]
    async fn listing_read_failure_propagates() {
        let registry = FakeRegistry {
            read_failure: Some(ProviderError::Transport("rpc down".into())),
            ..FakeRegistry::minted()
        };
        let registrar = Registrar::new(FakeWallet::on_chain(REQUIRED_CHAIN_HEX), registry);

        let err = registrar.fetch_mints().await.unwrap_err();
        assert_eq!(err, ProviderError::Transport("rpc down".into()));
    }

    #[tokio::test]
    async fn refresh_stops_polling_once_the_name_is_indexed() {
        let registry = FakeRegistry::minted();
        {
            let mut listings = registry.listings.borrow_mut();
            let stale = vec!["alpha".into()];
            let fresh = vec!["alpha".into(), "newname".into()];
            *listings = vec![stale.clone(), stale, fresh];
        }
        let registrar = Registrar::new(FakeWallet::on_chain(REQUIRED_CHAIN_HEX), registry);

        let delays = RefCell::new(Vec::new());
        let mints = registrar
            .fetch_mints_after_write("newname", |ms| {
                delays.borrow_mut().push(ms);
                std::future::ready(())
            })
            .await
            .unwrap();

        assert!(mints.iter().any(|m| m.name == "newname"));
        // Two stale reads, so exactly the first two backoff steps were slept.
        assert_eq!(*delays.borrow(), vec![500, 1_000]);
    }

    #[tokio::test]
    async fn refresh_ends_with_a_fetch_when_the_name_never_appears() {
        let registrar = Registrar::new(FakeWallet::on_chain(REQUIRED_CHAIN_HEX), FakeRegistry::minted());

        let delays = RefCell::new(Vec::new());
        let mints = registrar
            .fetch_mints_after_write("missing", |ms| {
                delays.borrow_mut().push(ms);
                std::future::ready(())
            })
            .await
            .unwrap();

        assert_eq!(*delays.borrow(), vec![500, 1_000, 2_000, 4_000]);
        assert_eq!(mints.len(), 3);
    }

    // ── Connect and network guard ──

    #[tokio::test]
    async fn detect_session_reads_authorization_without_prompting() {
        let mut wallet = FakeWallet::on_chain("0x1");
        wallet.authorized = vec![Account("0xAA".into()), Account("0xBB".into())];
        let registrar = Registrar::new(wallet, FakeRegistry::minted());

        let session = registrar.detect_session().await.unwrap();
        assert_eq!(session.account, Some(Account("0xAA".into())));
        assert_eq!(session.network_name(), Some("Mainnet"));
        assert_eq!(phase(&session, false), Phase::WrongNetwork);
    }

    #[tokio::test]
    async fn connect_stores_the_first_granted_account() {
        let registrar = Registrar::new(
            FakeWallet::on_chain(REQUIRED_CHAIN_HEX),
            FakeRegistry::minted(),
        );

        let session = registrar.connect().await.unwrap();
        assert_eq!(session.account, Some(Account("0xF00".into())));
        assert_eq!(phase(&session, false), Phase::Browsing);
    }

    #[tokio::test]
    async fn declined_connect_leaves_no_session() {
        let wallet = FakeWallet {
            granted: Err(ProviderError::Rejected {
                code: 4001,
                message: "denied".into(),
            }),
            ..FakeWallet::on_chain("0x1")
        };
        let registrar = Registrar::new(wallet, FakeRegistry::minted());

        let err = registrar.connect().await.unwrap_err();
        assert!(matches!(err, ProviderError::Rejected { code: 4001, .. }));
    }

    #[tokio::test]
    async fn unknown_chain_is_added_and_the_switch_retried() {
        let wallet = FakeWallet::on_chain("0x1");
        wallet.switch_script.borrow_mut().push(Err(
            ProviderError::UnrecognizedChain(ChainHex(REQUIRED_CHAIN_HEX.into())),
        ));
        let registrar = Registrar::new(wallet, FakeRegistry::minted());

        registrar.ensure_required_network().await.unwrap();
        assert_eq!(*registrar.wallet.switches.borrow(), 2);
        let added = registrar.wallet.added.borrow();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].chain_id.0, REQUIRED_CHAIN_HEX);
        assert_eq!(added[0].chain_name, REQUIRED_NETWORK_NAME);
    }

    #[tokio::test]
    async fn declined_switch_is_not_remediated() {
        let wallet = FakeWallet::on_chain("0x1");
        wallet.switch_script.borrow_mut().push(Err(ProviderError::Rejected {
            code: 4001,
            message: "denied".into(),
        }));
        let registrar = Registrar::new(wallet, FakeRegistry::minted());

        let err = registrar.ensure_required_network().await.unwrap_err();
        assert!(matches!(err, ProviderError::Rejected { .. }));
        assert_eq!(*registrar.wallet.switches.borrow(), 1);
        assert!(registrar.wallet.added.borrow().is_empty());
    }

    #[tokio::test]
    async fn rejection_code_4902_is_what_triggers_remediation() {
        // The raw code classifier and the guard compose: a 4902 from the
        // provider becomes UnrecognizedChain, which the guard remediates.
        let chain = ChainHex(REQUIRED_CHAIN_HEX.into());
        let classified =
            ProviderError::from_rpc(UNRECOGNIZED_CHAIN_CODE, "unknown chain".into(), Some(&chain));
        assert_eq!(classified, ProviderError::UnrecognizedChain(chain));
    }

    // ── End to end against fakes ──

    #[tokio::test]
    async fn connect_switch_and_list_walkthrough() {
        let wallet = FakeWallet::on_chain("0x1");
        wallet.switch_script.borrow_mut().push(Err(
            ProviderError::UnrecognizedChain(ChainHex(REQUIRED_CHAIN_HEX.into())),
        ));
        let registrar = Registrar::new(wallet, FakeRegistry::minted());

        // Page load: nothing authorized yet.
        let session = registrar.detect_session().await.unwrap();
        assert_eq!(phase(&session, false), Phase::Disconnected);

        // User connects; wallet still points at mainnet.
        let session = registrar.connect().await.unwrap();
        assert_eq!(phase(&session, false), Phase::WrongNetwork);

        // Guard registers the chain and switches; the wallet reloads the page
        // in the real flow, after which the session lands on the required
        // network and the listing renders.
        registrar.ensure_required_network().await.unwrap();
        let session = session.with_chain(ChainHex(REQUIRED_CHAIN_HEX.into()));
        assert_eq!(phase(&session, false), Phase::Browsing);

        let mints = registrar.fetch_mints().await.unwrap();
        let names: Vec<&str> = mints.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["alpha", "beta", "gamma"]);
        assert!(mints.iter().all(|m| !m.record.is_empty() && !m.owner.0.is_empty()));
    }
}
