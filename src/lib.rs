//! Transfer directive resolution
//!
//! Parses free-text money movement commands such as
//! `move £10 from holiday to my account` into a validated [`Directive`]
//! naming an amount, a source and a destination among the user's pots and
//! accounts. The resolved directive can then be planned into the pot/account
//! operations the ledger supports.
//!
//! ```
//! use transfer_directive::{LedgerSnapshot, RawAccount, RawPot, Resolver};
//!
//! let snapshot = LedgerSnapshot::new(
//!     vec![RawAccount::new("acc_1", &["Alex"])],
//!     vec![RawPot::new("pot_1", "Holiday")],
//! );
//! let (pots, accounts) = snapshot.catalogs();
//!
//! let directive = Resolver::default()
//!     .resolve("10 from holiday to my account", &pots, &accounts)
//!     .unwrap();
//! assert_eq!(directive.source.id, "pot_1");
//! assert_eq!(directive.destination.id, "acc_1");
//! ```

pub mod config;
pub mod directive;
pub mod error;
pub mod ledger;
pub mod transfer;

pub use config::ResolverConfig;
pub use directive::{
    resolve, CurrencySet, Directive, EntityKind, EntityRef, Keyword, Match, Resolver, Role,
};
pub use error::{CommandError, ConfigError, ResolutionError, TransferError};
pub use ledger::{build_catalogs, AccountCatalog, LedgerSnapshot, PotCatalog, RawAccount, RawPot};
pub use transfer::{LedgerClient, LedgerOp, MoveCommand, PreparedTransfer, TransferPlan};
