//! Ledger-side inputs: raw snapshots and the catalogs built from them

pub mod catalog;
pub mod snapshot;

pub use catalog::{build_catalogs, AccountCatalog, PotCatalog, SINGLE_ACCOUNT_ALIAS};
pub use snapshot::{LedgerSnapshot, Owner, RawAccount, RawPot};
