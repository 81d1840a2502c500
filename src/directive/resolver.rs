//! Directive resolution
//!
//! Turns a command body such as `10 from holiday to bills` into a
//! [`Directive`]. Two grammars are supported:
//!
//! - **Positional**: `<amount> [currency] <entity> <entity>`. The entity
//!   mentioned first is the source.
//! - **Keyword**: `<amount> from <entity> to <entity>`, in either keyword
//!   order. The keywords decide the direction.
//!
//! Resolution is a pure function of the body and the two catalogs. It keeps
//! no state between calls and never logs.

use smallvec::SmallVec;

use super::amount::CurrencySet;
use super::matcher::{contains_word, find_matches};
use super::normalize::{fold, normalize};
use super::types::{Directive, EntityRef, Keyword, Role};
use crate::error::ResolutionError;
use crate::ledger::catalog::{AccountCatalog, PotCatalog};

type Result<T> = std::result::Result<T, ResolutionError>;

/// Resolves command bodies against pot and account catalogs
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    currencies: CurrencySet,
}

impl Resolver {
    pub fn new(currencies: CurrencySet) -> Self {
        Self { currencies }
    }

    pub fn currencies(&self) -> &CurrencySet {
        &self.currencies
    }

    /// Resolve a command body (prefix already stripped) into a directive.
    ///
    /// The directive may still name the same entity twice; see
    /// [`Directive::ensure_distinct`].
    pub fn resolve(
        &self,
        body: &str,
        pots: &PotCatalog,
        accounts: &AccountCatalog,
    ) -> Result<Directive> {
        let tokens = normalize(body);
        let accounts = accounts.with_single_account_alias(pots);

        let from = position(&tokens, Keyword::From);
        let to = position(&tokens, Keyword::To);

        match (from, to) {
            (None, None) => self.resolve_positional(&tokens, pots, &accounts),
            (Some(from), Some(to)) => self.resolve_keyword(&tokens, from, to, pots, &accounts),
            (Some(_), None) => Err(missing_counterpart(Keyword::From)),
            (None, Some(_)) => Err(missing_counterpart(Keyword::To)),
        }
    }

    fn resolve_positional(
        &self,
        tokens: &[String],
        pots: &PotCatalog,
        accounts: &AccountCatalog,
    ) -> Result<Directive> {
        let (amount_token, rest) = match tokens.split_first() {
            Some((first, rest)) => (first.as_str(), rest),
            None => ("", tokens),
        };
        let amount = self.currencies.extract_amount(amount_token)?;

        // "10 GBP holiday bills"
        let rest = match rest.split_first() {
            Some((next, tail)) if self.currencies.is_marker(next) => tail,
            _ => rest,
        };

        let matches = find_matches(&rest.join(" "), pots, accounts);

        let [first, second] = matches.as_slice() else {
            return Err(ResolutionError::WrongMatchCount {
                found: matches.len(),
                ids: matches.iter().map(|m| m.entity.id.clone()).collect(),
            });
        };

        if first.offset == second.offset {
            return Err(ResolutionError::AmbiguousPositional);
        }

        // Matches come ordered by offset: the earlier mention is the source.
        Ok(Directive {
            amount,
            source: first.entity.clone(),
            destination: second.entity.clone(),
        })
    }

    fn resolve_keyword(
        &self,
        tokens: &[String],
        from: usize,
        to: usize,
        pots: &PotCatalog,
        accounts: &AccountCatalog,
    ) -> Result<Directive> {
        if from == 0 || to == 0 {
            return Err(ResolutionError::KeywordAtStart);
        }

        let (source_tokens, destination_tokens) = if to < from {
            (&tokens[from + 1..], &tokens[to + 1..from])
        } else {
            (&tokens[from + 1..to], &tokens[to + 1..])
        };

        let amount = self
            .currencies
            .extract_amount(&tokens[..from.min(to)].concat())?;

        let source_text = source_tokens.join(" ");
        let destination_text = destination_tokens.join(" ");

        let source = find_pot(&source_text, pots, Role::Source)?;
        let destination = find_pot(&destination_text, pots, Role::Destination)?;

        let source = settle_with_accounts(&source_text, source, accounts, Role::Source)?;
        let destination =
            settle_with_accounts(&destination_text, destination, accounts, Role::Destination)?;

        match (source, destination) {
            (Some(source), Some(destination)) => Ok(Directive {
                amount,
                source,
                destination,
            }),
            (source, destination) => {
                let ids: Vec<String> = [source, destination]
                    .into_iter()
                    .flatten()
                    .map(|e| e.id)
                    .collect();
                Err(ResolutionError::WrongMatchCount {
                    found: ids.len(),
                    ids,
                })
            }
        }
    }
}

/// Resolve a command body with the default currency markers.
pub fn resolve(body: &str, pots: &PotCatalog, accounts: &AccountCatalog) -> Result<Directive> {
    Resolver::default().resolve(body, pots, accounts)
}

fn position(tokens: &[String], keyword: Keyword) -> Option<usize> {
    tokens.iter().position(|t| t == keyword.as_str())
}

fn missing_counterpart(found: Keyword) -> ResolutionError {
    let missing = found.counterpart();
    ResolutionError::MissingCounterpart {
        found,
        missing,
        found_role: found.role(),
        missing_role: missing.role(),
    }
}

/// Resolve one entity span against the pot catalog.
///
/// An exact name wins unless a longer pot name also contains the span. A name
/// is wider when the span occurs in it as a whole word, so with pots
/// "holiday" and "holiday fund" the span `holiday` is ambiguous while
/// `holiday fund` is not. A pot whose ID appears in the span wins outright. Otherwise every pot whose name
/// contains, or is contained in, the span is a candidate, and more than one
/// candidate is ambiguous.
fn find_pot(span: &str, pots: &PotCatalog, role: Role) -> Result<Option<EntityRef>> {
    if span.is_empty() {
        return Ok(None);
    }

    if let Some(id) = pots.get(span) {
        let wider: SmallVec<[&str; 4]> = pots
            .iter()
            .filter(|(name, _)| *name != span && contains_word(name, span))
            .map(|(_, id)| id)
            .collect();

        if wider.is_empty() {
            return Ok(Some(EntityRef::pot(id)));
        }

        return Err(ResolutionError::AmbiguousDirection {
            direction: role,
            ids: std::iter::once(id)
                .chain(wider)
                .map(str::to_string)
                .collect(),
        });
    }

    let mut candidates: SmallVec<[&str; 4]> = SmallVec::new();
    for (name, id) in pots.iter() {
        if contains_word(span, name) || contains_word(name, span) {
            candidates.push(id);
        } else if !id.is_empty() && span.contains(&fold(id)) {
            return Ok(Some(EntityRef::pot(id)));
        }
    }

    match candidates.as_slice() {
        [] => Ok(None),
        [id] => Ok(Some(EntityRef::pot(*id))),
        _ => Err(ResolutionError::AmbiguousDirection {
            direction: role,
            ids: candidates.iter().map(|id| id.to_string()).collect(),
        }),
    }
}

/// Look the span up in the account catalog and reconcile the outcome with
/// the pot already found for it, if any.
///
/// Every distinct `(account, offset)` match counts, so an account mentioned
/// twice in one span (`alex account`) is ambiguous.
fn settle_with_accounts(
    span: &str,
    pot: Option<EntityRef>,
    accounts: &AccountCatalog,
    role: Role,
) -> Result<Option<EntityRef>> {
    if span.is_empty() {
        return Ok(pot);
    }

    let matches = find_matches(span, &PotCatalog::new(), accounts);

    match (pot, matches.as_slice()) {
        (pot, []) => Ok(pot),
        (None, [only]) => Ok(Some(only.entity.clone())),
        (pot, _) => Err(ResolutionError::AmbiguousDirection {
            direction: role,
            ids: matches
                .iter()
                .map(|m| m.entity.id.clone())
                .chain(pot.map(|p| p.id))
                .collect(),
        }),
    }
}
