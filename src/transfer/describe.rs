//! User-facing descriptions of pots, accounts and completed transfers

use rust_decimal::{Decimal, RoundingStrategy};

use crate::directive::{Directive, EntityKind, EntityRef};
use crate::ledger::catalog::PotCatalog;
use crate::ledger::snapshot::{LedgerSnapshot, RawAccount};

/// Human-readable name for a resolved pot or account.
///
/// Unknown IDs are returned as-is.
pub fn describe_entity(entity: &EntityRef, pots: &PotCatalog, snapshot: &LedgerSnapshot) -> String {
    match entity.kind {
        EntityKind::Pot => pots
            .name_of(&entity.id)
            .map(|name| format!("\"{name}\""))
            .unwrap_or_else(|| entity.id.clone()),
        EntityKind::Account => {
            let open: Vec<&RawAccount> = snapshot.open_accounts().collect();
            if open.len() == 1 {
                return "your current account".to_string();
            }
            open.iter()
                .find(|account| account.id == entity.id)
                .and_then(|account| describe_account(account))
                .unwrap_or_else(|| entity.id.clone())
        }
    }
}

/// "Alex's and Sam's current account", or `None` for an account without owners
fn describe_account(account: &RawAccount) -> Option<String> {
    if account.owners.is_empty() {
        return None;
    }
    let owners: Vec<String> = account
        .owners
        .iter()
        .map(|owner| format!("{}'s", owner.preferred_name))
        .collect();
    Some(format!("{} current account", owners.join(" and ")))
}

/// Render an amount with two decimal places
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// Success message for a completed transfer
pub fn summary(
    directive: &Directive,
    currency: &str,
    pots: &PotCatalog,
    snapshot: &LedgerSnapshot,
) -> String {
    format!(
        "Moved {} {} from {} to {}.",
        format_amount(directive.amount),
        currency,
        describe_entity(&directive.source, pots, snapshot),
        describe_entity(&directive.destination, pots, snapshot),
    )
}
