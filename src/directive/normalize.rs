//! Text normalization for directive parsing
//!
//! One canonical fold is shared by the command body, the catalogs, entity IDs
//! and currency markers, so that every comparison in the resolver sees the
//! same representation:
//! - Unicode NFKC normalization
//! - Unicode default case folding, so `ß` and `ss` compare equal

use caseless::default_case_fold_str;
use unicode_normalization::UnicodeNormalization;

/// Case-fold text for matching.
///
/// # Examples
///
/// ```
/// use transfer_directive::directive::normalize::fold;
///
/// assert_eq!(fold("Holiday Fund"), "holiday fund");
/// assert_eq!(fold("ＧＢＰ"), "gbp");
/// assert_eq!(fold("Straße"), fold("STRASSE"));
/// ```
pub fn fold(s: &str) -> String {
    default_case_fold_str(&s.nfkc().collect::<String>())
}

/// Fold a command body and split it into tokens.
///
/// Commas carry no meaning in the grammar and are treated as whitespace.
/// The command prefix is expected to be stripped already.
pub fn normalize(body: &str) -> Vec<String> {
    fold(body)
        .replace(',', " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
