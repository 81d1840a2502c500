//! Entity matching against a folded search string
//!
//! Names and account search terms only match as whole words, so a pot called
//! "isa" is not found inside "visa". Entity IDs are opaque tokens and match
//! anywhere.

use super::normalize::fold;
use super::types::{EntityRef, Match};
use crate::ledger::catalog::{search_terms, AccountCatalog, PotCatalog};

/// Byte position of `needle`'s first occurrence in `haystack`, accepted only
/// if that occurrence is not adjoined by a letter on either side.
pub fn find_whole_word(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }

    let start = haystack.find(needle)?;
    let end = start + needle.len();

    let before = haystack[..start].chars().next_back();
    let after = haystack[end..].chars().next();

    let bounded = |c: Option<char>| c.map_or(true, |c| !c.is_alphabetic());
    (bounded(before) && bounded(after)).then_some(start)
}

/// Whether `needle` occurs in `haystack` as a whole word
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    find_whole_word(haystack, needle).is_some()
}

/// Byte position of an entity ID inside `haystack`
fn find_id(haystack: &str, id: &str) -> Option<usize> {
    let id = fold(id);
    if id.is_empty() {
        return None;
    }
    haystack.find(&id)
}

/// Find every known pot and account mentioned in `haystack`.
///
/// `haystack` must already be folded. Results are ordered by offset and
/// contain each `(entity, offset)` pair once.
pub fn find_matches(haystack: &str, pots: &PotCatalog, accounts: &AccountCatalog) -> Vec<Match> {
    let mut found: Vec<(EntityRef, usize)> = Vec::new();

    for (name, id) in pots.iter() {
        let entity = EntityRef::pot(id);
        if let Some(at) = find_whole_word(haystack, name) {
            found.push((entity.clone(), at));
        }
        if let Some(at) = find_id(haystack, id) {
            found.push((entity, at));
        }
    }

    for (key, id) in accounts.iter() {
        let entity = EntityRef::account(id);
        for term in search_terms(key) {
            if let Some(at) = find_whole_word(haystack, term) {
                found.push((entity.clone(), at));
            }
        }
        if let Some(at) = find_id(haystack, id) {
            found.push((entity, at));
        }
    }

    found.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    found.dedup();

    found
        .into_iter()
        .map(|(entity, at)| Match {
            offset: haystack[..at].chars().count(),
            entity,
        })
        .collect()
}
