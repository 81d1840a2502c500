//! Transfer planning
//!
//! The ledger only moves money between a pot and an account. A directive is
//! turned into one or two such operations, routing pot → pot transfers
//! through an account and account → account transfers through a pot.

use anyhow::Context;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::directive::{Directive, EntityKind};
use crate::error::TransferError;
use crate::ledger::catalog::{AccountCatalog, PotCatalog};

/// A single ledger movement. Amounts are in minor units (pence).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LedgerOp {
    /// Move money out of a pot into an account
    Withdraw {
        pot_id: String,
        account_id: String,
        amount_minor: i64,
    },
    /// Move money from an account into a pot
    Deposit {
        account_id: String,
        pot_id: String,
        amount_minor: i64,
    },
}

/// Ordered ledger operations carrying out one directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPlan {
    pub amount_minor: i64,
    pub steps: Vec<LedgerOp>,
}

/// The transfer execution collaborator
pub trait LedgerClient {
    fn withdraw_from_pot(
        &mut self,
        pot_id: &str,
        account_id: &str,
        amount_minor: i64,
    ) -> anyhow::Result<()>;

    fn deposit_into_pot(
        &mut self,
        account_id: &str,
        pot_id: &str,
        amount_minor: i64,
    ) -> anyhow::Result<()>;
}

/// Convert a major-unit amount into minor units, rounding half away from zero.
pub fn to_minor_units(amount: Decimal) -> Result<i64, TransferError> {
    let out_of_range = || TransferError::AmountOutOfRange {
        amount: amount.to_string(),
    };

    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|minor| minor.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|minor| minor.to_i64())
        .ok_or_else(out_of_range)
}

impl TransferPlan {
    /// Plan the ledger operations for a directive.
    pub fn build(
        directive: &Directive,
        pots: &PotCatalog,
        accounts: &AccountCatalog,
    ) -> Result<Self, TransferError> {
        let directive = directive.clone().ensure_distinct()?;

        if directive.amount <= Decimal::ZERO {
            return Err(TransferError::NonPositiveAmount {
                amount: directive.amount.to_string(),
            });
        }

        let amount_minor = to_minor_units(directive.amount)?;
        if amount_minor == 0 {
            return Err(TransferError::NonPositiveAmount {
                amount: directive.amount.to_string(),
            });
        }

        let source = directive.source.id;
        let destination = directive.destination.id;

        let steps = match (directive.source.kind, directive.destination.kind) {
            (EntityKind::Pot, EntityKind::Account) => vec![LedgerOp::Withdraw {
                pot_id: source,
                account_id: destination,
                amount_minor,
            }],
            (EntityKind::Account, EntityKind::Pot) => vec![LedgerOp::Deposit {
                account_id: source,
                pot_id: destination,
                amount_minor,
            }],
            (EntityKind::Pot, EntityKind::Pot) => {
                let via = accounts
                    .first_id()
                    .ok_or(TransferError::NoIntermediaryAccount)?
                    .to_string();
                vec![
                    LedgerOp::Withdraw {
                        pot_id: source,
                        account_id: via.clone(),
                        amount_minor,
                    },
                    LedgerOp::Deposit {
                        account_id: via,
                        pot_id: destination,
                        amount_minor,
                    },
                ]
            }
            (EntityKind::Account, EntityKind::Account) => {
                let via = pots
                    .first_id()
                    .ok_or(TransferError::NoIntermediaryPot)?
                    .to_string();
                vec![
                    LedgerOp::Deposit {
                        account_id: source,
                        pot_id: via.clone(),
                        amount_minor,
                    },
                    LedgerOp::Withdraw {
                        pot_id: via,
                        account_id: destination,
                        amount_minor,
                    },
                ]
            }
        };

        Ok(Self {
            amount_minor,
            steps,
        })
    }

    /// Apply the steps in order, stopping at the first failure.
    pub fn execute<C: LedgerClient + ?Sized>(&self, client: &mut C) -> anyhow::Result<()> {
        for (index, step) in self.steps.iter().enumerate() {
            let outcome = match step {
                LedgerOp::Withdraw {
                    pot_id,
                    account_id,
                    amount_minor,
                } => client.withdraw_from_pot(pot_id, account_id, *amount_minor),
                LedgerOp::Deposit {
                    account_id,
                    pot_id,
                    amount_minor,
                } => client.deposit_into_pot(account_id, pot_id, *amount_minor),
            };
            outcome.with_context(|| format!("step {} of {} failed", index + 1, self.steps.len()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::EntityRef;
    use crate::error::ResolutionError;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn catalogs() -> (PotCatalog, AccountCatalog) {
        let pots = [("holiday", "pot_1"), ("bills", "pot_2")].into_iter().collect();
        let mut accounts = AccountCatalog::new();
        accounts.insert_owners(&["Alex"], "acc_1");
        accounts.insert_owners(&["Sam"], "acc_2");
        (pots, accounts)
    }

    fn directive(amount: &str, source: EntityRef, destination: EntityRef) -> Directive {
        Directive {
            amount: Decimal::from_str(amount).unwrap(),
            source,
            destination,
        }
    }

    #[derive(Default)]
    struct RecordingClient {
        calls: Vec<String>,
        fail_on: Option<usize>,
    }

    impl RecordingClient {
        fn record(&mut self, call: String) -> anyhow::Result<()> {
            if self.fail_on == Some(self.calls.len()) {
                anyhow::bail!("ledger unavailable");
            }
            self.calls.push(call);
            Ok(())
        }
    }

    impl LedgerClient for RecordingClient {
        fn withdraw_from_pot(&mut self, pot_id: &str, account_id: &str, amount: i64) -> anyhow::Result<()> {
            self.record(format!("withdraw {amount} {pot_id}->{account_id}"))
        }

        fn deposit_into_pot(&mut self, account_id: &str, pot_id: &str, amount: i64) -> anyhow::Result<()> {
            self.record(format!("deposit {amount} {account_id}->{pot_id}"))
        }
    }

    #[test]
    fn test_minor_units_rounding() {
        assert_eq!(to_minor_units(Decimal::from_str("10").unwrap()), Ok(1000));
        assert_eq!(to_minor_units(Decimal::from_str("0.125").unwrap()), Ok(13));
        assert_eq!(to_minor_units(Decimal::from_str("19.994").unwrap()), Ok(1999));
        assert!(to_minor_units(Decimal::MAX).is_err());
    }

    #[test]
    fn test_pot_to_account() {
        let (pots, accounts) = catalogs();
        let plan = TransferPlan::build(
            &directive("10", EntityRef::pot("pot_1"), EntityRef::account("acc_2")),
            &pots,
            &accounts,
        )
        .unwrap();

        assert_eq!(
            plan.steps,
            vec![LedgerOp::Withdraw {
                pot_id: "pot_1".into(),
                account_id: "acc_2".into(),
                amount_minor: 1000,
            }]
        );
    }

    #[test]
    fn test_pot_to_pot_goes_through_first_account() {
        let (pots, accounts) = catalogs();
        let plan = TransferPlan::build(
            &directive("2.5", EntityRef::pot("pot_1"), EntityRef::pot("pot_2")),
            &pots,
            &accounts,
        )
        .unwrap();

        let mut client = RecordingClient::default();
        plan.execute(&mut client).unwrap();
        assert_eq!(
            client.calls,
            vec!["withdraw 250 pot_1->acc_1", "deposit 250 acc_1->pot_2"]
        );
    }

    #[test]
    fn test_account_to_account_goes_through_first_pot() {
        let (pots, accounts) = catalogs();
        let plan = TransferPlan::build(
            &directive("1", EntityRef::account("acc_1"), EntityRef::account("acc_2")),
            &pots,
            &accounts,
        )
        .unwrap();

        let mut client = RecordingClient::default();
        plan.execute(&mut client).unwrap();
        assert_eq!(
            client.calls,
            vec!["deposit 100 acc_1->pot_1", "withdraw 100 pot_1->acc_2"]
        );
    }

    #[test]
    fn test_missing_intermediaries() {
        let err = TransferPlan::build(
            &directive("1", EntityRef::account("acc_1"), EntityRef::account("acc_2")),
            &PotCatalog::new(),
            &AccountCatalog::new(),
        )
        .unwrap_err();
        assert_eq!(err, TransferError::NoIntermediaryPot);

        let err = TransferPlan::build(
            &directive("1", EntityRef::pot("pot_1"), EntityRef::pot("pot_2")),
            &PotCatalog::new(),
            &AccountCatalog::new(),
        )
        .unwrap_err();
        assert_eq!(err, TransferError::NoIntermediaryAccount);
    }

    #[test]
    fn test_rejects_same_entity_and_bad_amounts() {
        let (pots, accounts) = catalogs();

        let err = TransferPlan::build(
            &directive("1", EntityRef::pot("pot_1"), EntityRef::pot("pot_1")),
            &pots,
            &accounts,
        )
        .unwrap_err();
        assert_eq!(
            err,
            TransferError::Resolution(ResolutionError::SameSourceAndDestination)
        );

        for amount in ["0", "-5", "0.001"] {
            let err = TransferPlan::build(
                &directive(amount, EntityRef::pot("pot_1"), EntityRef::account("acc_1")),
                &pots,
                &accounts,
            )
            .unwrap_err();
            assert!(matches!(err, TransferError::NonPositiveAmount { .. }), "{amount}");
        }
    }

    #[test]
    fn test_execute_stops_at_first_failure() {
        let (pots, accounts) = catalogs();
        let plan = TransferPlan::build(
            &directive("3", EntityRef::pot("pot_1"), EntityRef::pot("pot_2")),
            &pots,
            &accounts,
        )
        .unwrap();

        let mut client = RecordingClient {
            fail_on: Some(1),
            ..Default::default()
        };
        let err = plan.execute(&mut client).unwrap_err();

        assert_eq!(client.calls, vec!["withdraw 300 pot_1->acc_1"]);
        assert_eq!(err.to_string(), "step 2 of 2 failed");
    }

    #[test]
    fn test_plan_serializes_with_op_tags() {
        let (pots, accounts) = catalogs();
        let plan = TransferPlan::build(
            &directive("1", EntityRef::account("acc_1"), EntityRef::pot("pot_2")),
            &pots,
            &accounts,
        )
        .unwrap();

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["steps"][0]["op"], "deposit");
        assert_eq!(json["steps"][0]["pot_id"], "pot_2");
    }
}
