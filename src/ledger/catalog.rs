//! Entity catalogs for directive resolution
//!
//! Catalogs are built fresh from a `LedgerSnapshot` for every command and
//! dropped afterwards. Keys are folded with the same `fold` the resolver
//! applies to the command body. Entries keep the order in which the ledger
//! listed them; re-inserting a key replaces its ID in place.

use std::borrow::Cow;

use super::snapshot::{RawAccount, RawPot};
use crate::directive::normalize::fold;

/// Alias matching the only open account ("my account", "current account")
pub const SINGLE_ACCOUNT_ALIAS: &str = "account";

/// Folded pot name → pot ID
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PotCatalog {
    entries: Vec<(String, String)>,
}

impl PotCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pot. A later pot whose name folds to the same key replaces
    /// the earlier one.
    pub fn insert(&mut self, name: &str, id: impl Into<String>) {
        upsert(&mut self.entries, fold(name), id.into());
    }

    /// Lookup by folded name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| id.as_str())
    }

    /// Folded name of the pot with this ID
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, i)| i == id)
            .map(|(n, _)| n.as_str())
    }

    /// `(folded name, id)` pairs in listing order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, id)| (n.as_str(), id.as_str()))
    }

    pub fn first_id(&self) -> Option<&str> {
        self.entries.first().map(|(_, id)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: AsRef<str>, I: Into<String>> FromIterator<(N, I)> for PotCatalog {
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for (name, id) in iter {
            catalog.insert(name.as_ref(), id);
        }
        catalog
    }
}

/// Comma-joined folded search terms → account ID
///
/// The search terms of an account are its owners' preferred names, in the
/// order the ledger lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountCatalog {
    entries: Vec<(String, String)>,
}

impl AccountCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an account under a comma-joined key of search terms
    pub fn insert(&mut self, key: &str, id: impl Into<String>) {
        upsert(&mut self.entries, fold(key), id.into());
    }

    /// Insert an account keyed by its owners' names
    pub fn insert_owners(&mut self, owners: &[&str], id: impl Into<String>) {
        self.insert(&owners.join(","), id);
    }

    /// `(folded key, id)` pairs in listing order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, id)| (k.as_str(), id.as_str()))
    }

    pub fn first_id(&self) -> Option<&str> {
        self.entries.first().map(|(_, id)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Catalog used for one resolution call.
    ///
    /// With exactly one account, [`SINGLE_ACCOUNT_ALIAS`] is added as an extra
    /// key for it, unless some pot name contains that word and would be
    /// shadowed by it. The receiver is left untouched.
    pub fn with_single_account_alias(&self, pots: &PotCatalog) -> Cow<'_, AccountCatalog> {
        let [(_, id)] = self.entries.as_slice() else {
            return Cow::Borrowed(self);
        };

        if pots.iter().any(|(name, _)| name.contains(SINGLE_ACCOUNT_ALIAS)) {
            return Cow::Borrowed(self);
        }

        let mut aliased = self.clone();
        aliased.insert(SINGLE_ACCOUNT_ALIAS, id.clone());
        Cow::Owned(aliased)
    }
}

/// Individual search terms of a catalog key
pub fn search_terms(key: &str) -> impl Iterator<Item = &str> {
    key.split(',').filter(|term| !term.is_empty())
}

fn upsert(entries: &mut Vec<(String, String)>, key: String, id: String) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = id,
        None => entries.push((key, id)),
    }
}

/// Build the pot and account catalogs from raw ledger listings.
///
/// Deleted pots and closed accounts are left out.
pub fn build_catalogs(accounts: &[RawAccount], pots: &[RawPot]) -> (PotCatalog, AccountCatalog) {
    let pot_catalog: PotCatalog = pots
        .iter()
        .filter(|pot| !pot.deleted)
        .map(|pot| (pot.name.as_str(), pot.id.clone()))
        .collect();

    let mut account_catalog = AccountCatalog::new();
    for account in accounts.iter().filter(|a| !a.closed) {
        let owners: Vec<&str> = account
            .owners
            .iter()
            .map(|o| o.preferred_name.as_str())
            .collect();
        account_catalog.insert_owners(&owners, account.id.clone());
    }

    (pot_catalog, account_catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_skips_deleted_and_closed() {
        let accounts = vec![
            RawAccount::new("acc_1", &["Alex"]),
            RawAccount::new("acc_2", &["Sam"]).closed(),
        ];
        let pots = vec![
            RawPot::new("pot_1", "Holiday"),
            RawPot::new("pot_2", "Old").deleted(),
        ];

        let (pots, accounts) = build_catalogs(&accounts, &pots);

        assert_eq!(pots.iter().collect::<Vec<_>>(), vec![("holiday", "pot_1")]);
        assert_eq!(accounts.iter().collect::<Vec<_>>(), vec![("alex", "acc_1")]);
    }

    #[test]
    fn test_joint_account_key_keeps_owner_order() {
        let accounts = vec![RawAccount::new("acc_joint", &["Sam", "Alex"])];
        let (_, accounts) = build_catalogs(&accounts, &[]);

        assert_eq!(accounts.iter().next(), Some(("sam,alex", "acc_joint")));
        assert_eq!(search_terms("sam,alex").collect::<Vec<_>>(), vec!["sam", "alex"]);
    }

    #[test]
    fn test_duplicate_pot_name_later_wins() {
        let pots = vec![
            RawPot::new("pot_1", "Savings"),
            RawPot::new("pot_2", "Bills"),
            RawPot::new("pot_3", "SAVINGS"),
        ];
        let (pots, _) = build_catalogs(&[], &pots);

        assert_eq!(pots.len(), 2);
        assert_eq!(pots.get("savings"), Some("pot_3"));
        assert_eq!(pots.first_id(), Some("pot_3"));
    }

    #[test]
    fn test_name_of() {
        let pots: PotCatalog = [("Holiday", "pot_1")].into_iter().collect();
        assert_eq!(pots.name_of("pot_1"), Some("holiday"));
        assert_eq!(pots.name_of("pot_9"), None);
    }

    #[test]
    fn test_single_account_alias_injected() {
        let mut accounts = AccountCatalog::new();
        accounts.insert_owners(&["Alex"], "acc_1");
        let pots: PotCatalog = [("holiday", "pot_1")].into_iter().collect();

        let aliased = accounts.with_single_account_alias(&pots);

        assert_eq!(aliased.len(), 2);
        assert!(aliased.iter().any(|(k, id)| k == "account" && id == "acc_1"));
        // receiver left as it was
        assert_eq!(accounts.len(), 1);
    }

    #[test]
    fn test_single_account_alias_shadowed_by_pot() {
        let mut accounts = AccountCatalog::new();
        accounts.insert_owners(&["Alex"], "acc_1");
        let pots: PotCatalog = [("my account", "pot_1")].into_iter().collect();

        let aliased = accounts.with_single_account_alias(&pots);
        assert!(matches!(aliased, Cow::Borrowed(_)));
        assert_eq!(aliased.len(), 1);
    }

    #[test]
    fn test_no_alias_with_several_accounts() {
        let mut accounts = AccountCatalog::new();
        accounts.insert_owners(&["Alex"], "acc_1");
        accounts.insert_owners(&["Sam"], "acc_2");

        let aliased = accounts.with_single_account_alias(&PotCatalog::new());
        assert_eq!(aliased.len(), 2);
    }
}
