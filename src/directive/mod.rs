//! Natural-language transfer directive resolution
//!
//! Pipeline:
//!
//! ```text
//! body ─► normalize ─► amount ──────────────┐
//!                                           ├─► resolver ─► Directive
//! snapshot ─► catalogs ─► matcher ──────────┘
//! ```

pub mod amount;
pub mod matcher;
pub mod normalize;
pub mod resolver;
pub mod types;

pub use amount::{extract_amount, CurrencySet, DEFAULT_CURRENCY_MARKERS};
pub use matcher::find_matches;
pub use normalize::{fold, normalize};
pub use resolver::{resolve, Resolver};
pub use types::{Directive, EntityKind, EntityRef, Keyword, Match, Role};
