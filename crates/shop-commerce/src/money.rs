//! Money type for representing monetary values.
//!
//! Amounts are integer minor units (paise for INR, cents for USD) tagged
//! with a currency, so totals never go through floating point and prices
//! never have to be sliced out of formatted strings.

use crate::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
    JPY,
}

impl Currency {
    /// All supported currencies.
    pub const ALL: [Currency; 5] = [
        Currency::INR,
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::JPY,
    ];

    /// Get the currency code (e.g., "INR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
        }
    }

    /// Get the display symbol (e.g., "Rs.").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "Rs.",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Prefixes accepted when parsing a price in this currency.
    fn prefixes(&self) -> &'static [&'static str] {
        match self {
            Currency::INR => &["INR", "Rs.", "Rs", "\u{20b9}"],
            Currency::USD => &["USD", "$"],
            Currency::EUR => &["EUR", "\u{20ac}"],
            Currency::GBP => &["GBP", "\u{00a3}"],
            Currency::JPY => &["JPY", "\u{00a5}"],
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Split a leading currency code or symbol off `input`.
    ///
    /// The longest matching prefix wins, so "Rs." is preferred over "Rs".
    fn strip_prefix(input: &str) -> Option<(Currency, &str)> {
        let mut best: Option<(Currency, usize)> = None;
        for currency in Self::ALL {
            for prefix in currency.prefixes() {
                let matched = input
                    .get(..prefix.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
                if matched && best.map_or(true, |(_, len)| prefix.len() > len) {
                    best = Some((currency, prefix.len()));
                }
            }
        }
        best.map(|(currency, len)| (currency, &input[len..]))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a Money value from minor units.
    pub const fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from a whole number of major units.
    ///
    /// ```
    /// use shop_commerce::money::{Currency, Money};
    /// assert_eq!(Money::from_major(20, Currency::INR).amount_minor, 2000);
    /// ```
    ///
    /// Amounts beyond the range of `i64` minor units saturate at the bound.
    pub fn from_major(amount: i64, currency: Currency) -> Self {
        let scale = 10_i64.pow(currency.decimal_places());
        Self::new(amount.saturating_mul(scale), currency)
    }

    /// Create a zero amount in the given currency.
    pub const fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Parse a price such as `"Rs.20"`, `"INR 1,299.50"` or `"45"`.
    ///
    /// A leading code or symbol selects the currency; without one the
    /// amount is read in `default`.
    pub fn parse(input: &str, default: Currency) -> Result<Self, CommerceError> {
        let trimmed = input.trim();
        let (currency, rest) = Currency::strip_prefix(trimmed).unwrap_or((default, trimmed));
        let amount_minor = parse_minor_units(rest.trim(), currency.decimal_places())
            .ok_or_else(|| CommerceError::InvalidPrice(input.to_string()))?;
        Ok(Self::new(amount_minor, currency))
    }

    /// Format with all decimal places (e.g., "Rs.49.90").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format without the fraction when it is zero (e.g., "Rs.20").
    pub fn display_compact(&self) -> String {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        if self.amount_minor % divisor == 0 {
            format!("{}{}", self.currency.symbol(), self.amount_minor / divisor)
        } else {
            self.display()
        }
    }

    /// Format the amount without a symbol (e.g., "49.90").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        let divisor = 10_i64.pow(places);
        let sign = if self.amount_minor < 0 { "-" } else { "" };
        let abs = self.amount_minor.unsigned_abs();
        let whole = abs / divisor.unsigned_abs();
        if places == 0 {
            return format!("{sign}{whole}");
        }
        let frac = abs % divisor.unsigned_abs();
        format!("{sign}{whole}.{frac:0width$}", width = places as usize)
    }

    /// Add another Money value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_minor
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Sum Money values in `currency`.
    pub fn try_sum<'a>(
        iter: impl IntoIterator<Item = &'a Money>,
        currency: Currency,
    ) -> Result<Money, CommerceError> {
        iter.into_iter().try_fold(Money::zero(currency), |acc, m| {
            if m.currency != currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: currency.code().to_string(),
                    got: m.currency.code().to_string(),
                });
            }
            acc.try_add(m).ok_or(CommerceError::Overflow)
        })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Parse an unsigned decimal amount into minor units.
fn parse_minor_units(s: &str, places: u32) -> Option<i64> {
    let digits: String = s.chars().filter(|c| *c != ',').collect();
    let (whole, frac) = match digits.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (digits.as_str(), ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if frac.len() > places as usize {
        return None;
    }
    if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let frac: i64 = if frac.is_empty() {
        0
    } else {
        let scale = 10_i64.pow(places - frac.len() as u32);
        frac.parse::<i64>().ok()?.checked_mul(scale)?
    };

    whole
        .checked_mul(10_i64.pow(places))?
        .checked_add(frac)
}
