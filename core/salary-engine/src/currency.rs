//! FILENAME: core/salary-engine/src/currency.rs
//! PURPOSE: Currency table and amount formatting for display.
//! CONTEXT: Salaries are shown in whole units with thousands separators and
//! the currency's symbol in front. Unknown codes never fail; the bare code
//! is used as the prefix instead.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Code used when no better currency can be determined.
pub const DEFAULT_CURRENCY: &str = "USD";

/// One row of the currency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    /// Prefix rendered in front of the amount, including any spacing.
    pub symbol: String,
}

impl Currency {
    pub fn new(code: impl Into<String>, symbol: impl Into<String>) -> Self {
        Currency {
            code: code.into(),
            symbol: symbol.into(),
        }
    }
}

/// Lookup table of supported currencies, in the order the submission form
/// lists them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyTable {
    currencies: Vec<Currency>,
}

impl CurrencyTable {
    pub fn new(currencies: Vec<Currency>) -> Self {
        CurrencyTable { currencies }
    }

    pub fn get(&self, code: &str) -> Option<&Currency> {
        self.currencies.iter().find(|c| c.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn symbol_for(&self, code: &str) -> Option<&str> {
        self.get(code).map(|c| c.symbol.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Currency> {
        self.currencies.iter()
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    /// Formats `amount` in whole units of `code`.
    pub fn format(&self, amount: f64, code: &str) -> String {
        match self.symbol_for(code) {
            Some(symbol) => format_with_prefix(amount, symbol),
            None => format_with_prefix(amount, &format!("{} ", code)),
        }
    }
}

impl Default for CurrencyTable {
    fn default() -> Self {
        CurrencyTable::new(vec![
            Currency::new("USD", "$"),
            Currency::new("EUR", "€"),
            Currency::new("GBP", "£"),
            Currency::new("INR", "₹"),
            Currency::new("LKR", "Rs "),
            Currency::new("JPY", "¥"),
            Currency::new("CAD", "C$"),
            Currency::new("AUD", "A$"),
            Currency::new("SGD", "S$"),
            Currency::new("CHF", "CHF "),
            Currency::new("SEK", "kr "),
        ])
    }
}

static DEFAULT_TABLE: OnceLock<CurrencyTable> = OnceLock::new();

/// Formats an amount with the default currency table.
pub fn format_currency(amount: f64, code: &str) -> String {
    DEFAULT_TABLE.get_or_init(CurrencyTable::default).format(amount, code)
}

/// Renders `prefix` + grouped whole amount, with a leading `-` for the
/// rare negative input.
fn format_with_prefix(amount: f64, prefix: &str) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{}{}", sign, prefix, group_digits(&format!("{:.0}", rounded.abs())))
}

/// Inserts a `,` every three digits from the right. `digits` is a plain run
/// of ASCII digits.
fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
