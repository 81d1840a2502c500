//! `move` / `transfer` command
//!
//! Glues the pieces together for one chat command: strip the command word,
//! build fresh catalogs from the ledger snapshot, resolve the body, plan the
//! ledger operations and describe the result.

use serde::Serialize;
use tracing::{debug, info};

use super::describe::summary;
use super::plan::{LedgerClient, TransferPlan};
use crate::config::ResolverConfig;
use crate::directive::{fold, Directive, Resolver};
use crate::error::CommandError;
use crate::ledger::snapshot::LedgerSnapshot;

/// A resolved and planned transfer, ready to execute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedTransfer {
    pub directive: Directive,
    pub plan: TransferPlan,
    pub summary: String,
}

#[derive(Debug, Clone, Default)]
pub struct MoveCommand {
    config: ResolverConfig,
    resolver: Resolver,
}

impl MoveCommand {
    pub fn new(config: ResolverConfig) -> Self {
        let resolver = config.resolver();
        Self { config, resolver }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Remove the leading command word, returning the body that follows it.
    pub fn strip_prefix<'a>(&self, message: &'a str) -> Result<&'a str, CommandError> {
        let message = message.trim_start();
        let word_end = message
            .find(char::is_whitespace)
            .unwrap_or(message.len());
        let (word, body) = message.split_at(word_end);

        let word = fold(word);
        if self
            .config
            .command_prefixes
            .iter()
            .any(|prefix| fold(prefix) == word)
        {
            Ok(body.trim_start())
        } else {
            Err(CommandError::UnknownCommand {
                expected: self.config.command_prefixes.clone(),
            })
        }
    }

    /// Resolve and plan a command without touching the ledger.
    pub fn prepare(
        &self,
        message: &str,
        snapshot: &LedgerSnapshot,
    ) -> Result<PreparedTransfer, CommandError> {
        let body = self.strip_prefix(message)?;

        let (pots, accounts) = snapshot.catalogs();
        debug!(pots = pots.len(), accounts = accounts.len(), "Built catalogs");

        if accounts.is_empty() {
            debug!("Rejected transfer: no open accounts");
            return Err(CommandError::NoAccounts);
        }

        let directive = self
            .resolver
            .resolve(body, &pots, &accounts)
            .inspect_err(|e| debug!(error = %e, "Could not resolve transfer"))?
            .ensure_distinct()?;
        debug!(
            amount = %directive.amount,
            source = %directive.source.id,
            destination = %directive.destination.id,
            "Resolved transfer"
        );

        let plan = TransferPlan::build(&directive, &pots, &accounts)?;
        debug!(steps = plan.steps.len(), amount_minor = plan.amount_minor, "Planned transfer");

        let summary = summary(&directive, &self.config.display_currency, &pots, snapshot);

        Ok(PreparedTransfer {
            directive,
            plan,
            summary,
        })
    }

    /// Resolve, plan and execute a command, returning the success message.
    pub fn run<C: LedgerClient + ?Sized>(
        &self,
        message: &str,
        snapshot: &LedgerSnapshot,
        client: &mut C,
    ) -> Result<String, CommandError> {
        let prepared = self.prepare(message, snapshot)?;

        prepared
            .plan
            .execute(client)
            .map_err(CommandError::Execution)?;

        info!(
            source = %prepared.directive.source.id,
            destination = %prepared.directive.destination.id,
            amount_minor = prepared.plan.amount_minor,
            "Transfer completed"
        );
        Ok(prepared.summary)
    }
}
