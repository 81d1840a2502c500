//! Turning resolved directives into ledger operations

pub mod command;
pub mod describe;
pub mod plan;

pub use command::{MoveCommand, PreparedTransfer};
pub use describe::{describe_entity, format_amount, summary};
pub use plan::{to_minor_units, LedgerClient, LedgerOp, TransferPlan};
