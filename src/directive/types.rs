//! Directive data model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ResolutionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Pot,
    Account,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Pot => write!(f, "pot"),
            EntityKind::Account => write!(f, "account"),
        }
    }
}

/// Identifies one pot or account
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: String,
    pub kind: EntityKind,
}

impl EntityRef {
    pub fn pot(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: EntityKind::Pot,
        }
    }

    pub fn account(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: EntityKind::Account,
        }
    }
}

/// An entity found in a search string.
///
/// `offset` is the character index of the match in the folded haystack and
/// only serves to order matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Match {
    pub entity: EntityRef,
    pub offset: usize,
}

/// A resolved transfer instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    pub amount: Decimal,
    pub source: EntityRef,
    pub destination: EntityRef,
}

impl Directive {
    /// Reject a directive that would move money from an entity to itself.
    pub fn ensure_distinct(self) -> Result<Self, ResolutionError> {
        if self.source == self.destination {
            return Err(ResolutionError::SameSourceAndDestination);
        }
        Ok(self)
    }
}

/// Direction keywords of the keyword grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Keyword {
    From,
    To,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::From => "from",
            Keyword::To => "to",
        }
    }

    /// Role of the entity the keyword introduces
    pub fn role(&self) -> Role {
        match self {
            Keyword::From => Role::Source,
            Keyword::To => Role::Destination,
        }
    }

    pub fn counterpart(&self) -> Keyword {
        match self {
            Keyword::From => Keyword::To,
            Keyword::To => Keyword::From,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of a transfer an entity is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Source,
    Destination,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Source => write!(f, "source"),
            Role::Destination => write!(f, "destination"),
        }
    }
}
