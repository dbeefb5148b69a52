//! Platform-neutral controller logic for the NameCortex registrar front end.
//!
//! Everything here is pure with respect to the browser: wallet and contract
//! access go through the `nc-chain-client` traits, UI state is modelled as
//! immutable value records with explicit transition functions, and the async
//! flows are generic so tests can drive them with in-memory fakes.

pub mod flow;
pub mod networks;
pub mod pricing;
pub mod session;

pub use flow::{MintError, MintOutcome, Registrar};
pub use pricing::FeeTier;
pub use session::{PendingEntry, Phase, Session};
