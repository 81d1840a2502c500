//! Amount extraction
//!
//! Amounts are decimals in major currency units (pounds, not pence). A single
//! currency marker may be attached to either end of the amount, e.g. `£10`,
//! `10GBP` or `$2.50`.

use nom::{
    branch::alt,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{all_consuming, opt, recognize},
    sequence::{pair, tuple},
    IResult,
};
use rust_decimal::Decimal;
use std::str::FromStr;

use super::normalize::fold;
use crate::error::ResolutionError;

/// Currency markers accepted when no configuration overrides them
pub const DEFAULT_CURRENCY_MARKERS: &[&str] = &["£", "GBP", "$", "USD"];

/// The set of currency symbols and codes an amount may carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencySet {
    markers: Vec<String>,
}

impl Default for CurrencySet {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY_MARKERS.iter().copied())
    }
}

impl CurrencySet {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    /// Markers in their display form, in configuration order
    pub fn supported(&self) -> &[String] {
        &self.markers
    }

    /// Whether a standalone token is one of the markers
    pub fn is_marker(&self, token: &str) -> bool {
        let token = fold(token);
        self.markers.iter().any(|m| fold(m) == token)
    }

    /// Extract the amount from a token, or several tokens concatenated.
    ///
    /// The whole string is tried as a number first. Failing that, each
    /// marker is tried in turn: one occurrence is stripped from the end it
    /// sits on and the remainder is parsed again. Only one marker is ever
    /// stripped, so `£10GBP` is rejected.
    pub fn extract_amount(&self, input: &str) -> Result<Decimal, ResolutionError> {
        let input = fold(input);

        if let Some(amount) = parse_decimal(&input) {
            return Ok(amount);
        }

        for marker in &self.markers {
            let marker = fold(marker);
            if marker.is_empty() {
                continue;
            }

            let remainder = input
                .strip_suffix(marker.as_str())
                .or_else(|| input.strip_prefix(marker.as_str()));

            if let Some(amount) = remainder.and_then(parse_decimal) {
                return Ok(amount);
            }
        }

        Err(ResolutionError::UnsupportedCurrency {
            supported: self.markers.clone(),
        })
    }
}

/// Extract an amount using the default currency markers.
pub fn extract_amount(input: &str) -> Result<Decimal, ResolutionError> {
    CurrencySet::default().extract_amount(input)
}

/// `[+-]digits[.digits]` or `[+-].digits`
fn number(input: &str) -> IResult<&str, (Option<char>, &str)> {
    pair(
        opt(one_of("+-")),
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(tuple((char('.'), digit1))),
        )),
    )(input)
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    let (_, (sign, body)) = all_consuming(number)(s).ok()?;

    let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
    let whole = if whole.is_empty() { "0" } else { whole };
    let magnitude = if fraction.is_empty() {
        Decimal::from_str(whole)
    } else {
        Decimal::from_str(&format!("{whole}.{fraction}"))
    }
    .ok()?;

    Some(if sign == Some('-') { -magnitude } else { magnitude })
}
