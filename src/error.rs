//! Error types for directive resolution and transfer preparation
//!
//! Every resolution failure is a recoverable parse failure that the user can
//! fix by rewording the command. The `Display` output of each variant is the
//! default user-facing rendering and carries every payload field.

use thiserror::Error;

use crate::directive::{Keyword, Role};

/// Why a command body could not be resolved into a directive
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error(
        "Unsupported currency. Supported currencies and symbols are: {}",
        .supported.join(", ")
    )]
    UnsupportedCurrency { supported: Vec<String> },

    #[error(
        "Expected exactly 2 pots or accounts, found {found}{}",
        format_ids(.ids)
    )]
    WrongMatchCount { found: usize, ids: Vec<String> },

    #[error("Can't tell the source from the destination, try using \"from\" and \"to\"")]
    AmbiguousPositional,

    #[error(
        "Found a \"{found}\" ({found_role}) but no \"{missing}\" ({missing_role})"
    )]
    MissingCounterpart {
        found: Keyword,
        missing: Keyword,
        found_role: Role,
        missing_role: Role,
    },

    #[error("The command can't start with \"from\" or \"to\", the amount comes first")]
    KeywordAtStart,

    #[error(
        "The {direction} matches {} pots or accounts{}, use an ID to disambiguate",
        .ids.len(),
        format_ids(.ids)
    )]
    AmbiguousDirection { direction: Role, ids: Vec<String> },

    #[error("The source and the destination are the same")]
    SameSourceAndDestination,
}

fn format_ids(ids: &[String]) -> String {
    if ids.is_empty() {
        String::new()
    } else {
        format!(" ({})", ids.join(", "))
    }
}

/// Errors turning a resolved directive into ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("The amount must be greater than zero, got {amount}")]
    NonPositiveAmount { amount: String },

    #[error("The amount {amount} is too large to transfer")]
    AmountOutOfRange { amount: String },

    #[error("Moving money between pots needs at least one open account")]
    NoIntermediaryAccount,

    #[error("Moving money between accounts needs at least one pot")]
    NoIntermediaryPot,
}

/// Errors from the `move`/`transfer` command facade
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unknown command, expected one of: {}", .expected.join(", "))]
    UnknownCommand { expected: Vec<String> },

    #[error("You don't have any open account to move money with")]
    NoAccounts,

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error("The transfer failed: {0:#}")]
    Execution(anyhow::Error),
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
