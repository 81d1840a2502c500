//! Ledger snapshot types
//!
//! A `LedgerSnapshot` is the raw account and pot listing fetched from the
//! ledger service right before a command is resolved. The shapes follow the
//! service's JSON listings; unknown fields are ignored.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::catalog::{build_catalogs, AccountCatalog, PotCatalog};

/// Account and pot listings as of call time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub accounts: Vec<RawAccount>,

    #[serde(default)]
    pub pots: Vec<RawPot>,
}

/// A single account row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAccount {
    pub id: String,

    #[serde(default)]
    pub owners: Vec<Owner>,

    #[serde(default)]
    pub closed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub preferred_name: String,
}

/// A single pot row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPot {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub deleted: bool,
}

impl RawAccount {
    pub fn new(id: impl Into<String>, owners: &[&str]) -> Self {
        Self {
            id: id.into(),
            owners: owners
                .iter()
                .map(|name| Owner {
                    preferred_name: (*name).to_string(),
                })
                .collect(),
            closed: false,
        }
    }

    /// Builder pattern: mark the account as closed
    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }
}

impl RawPot {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            deleted: false,
        }
    }

    /// Builder pattern: mark the pot as deleted
    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }
}

impl LedgerSnapshot {
    pub fn new(accounts: Vec<RawAccount>, pots: Vec<RawPot>) -> Self {
        Self { accounts, pots }
    }

    /// Parse a snapshot from its JSON form
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Invalid ledger snapshot JSON")
    }

    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to load snapshot: {}", path.display()))
    }

    /// Accounts that can take part in a transfer
    pub fn open_accounts(&self) -> impl Iterator<Item = &RawAccount> {
        self.accounts.iter().filter(|a| !a.closed)
    }

    /// Build fresh lookup catalogs from this snapshot
    pub fn catalogs(&self) -> (PotCatalog, AccountCatalog) {
        build_catalogs(&self.accounts, &self.pots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT_JSON: &str = r#"{
        "accounts": [
            {
                "id": "acc_00009",
                "closed": false,
                "description": "user_00009",
                "owners": [{"user_id": "user_00009", "preferred_name": "Alex"}]
            },
            {"id": "acc_old", "closed": true, "owners": []}
        ],
        "pots": [
            {"id": "pot_1", "name": "Holiday", "deleted": false, "balance": 1200},
            {"id": "pot_2", "name": "Bills"}
        ]
    }"#;

    #[test]
    fn test_parse_service_listing() {
        let snapshot = LedgerSnapshot::from_json_str(SNAPSHOT_JSON).unwrap();
        assert_eq!(snapshot.accounts.len(), 2);
        assert_eq!(snapshot.accounts[0].owners[0].preferred_name, "Alex");
        assert!(snapshot.accounts[1].closed);
        assert!(!snapshot.pots[1].deleted);
    }

    #[test]
    fn test_open_accounts() {
        let snapshot = LedgerSnapshot::from_json_str(SNAPSHOT_JSON).unwrap();
        let open: Vec<_> = snapshot.open_accounts().map(|a| a.id.as_str()).collect();
        assert_eq!(open, vec!["acc_00009"]);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let snapshot = LedgerSnapshot::from_json_str("{}").unwrap();
        assert!(snapshot.accounts.is_empty());
        assert!(snapshot.pots.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        assert!(LedgerSnapshot::from_json_str("{\"pots\": 3}").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        std::fs::write(&path, SNAPSHOT_JSON).unwrap();

        let snapshot = LedgerSnapshot::load(&path).unwrap();
        assert_eq!(snapshot.pots.len(), 2);

        let missing = LedgerSnapshot::load(&dir.path().join("nope.json"));
        assert!(missing.is_err());
    }
}
