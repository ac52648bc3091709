use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

// Exchange-suffixed tickers like RELIANCE.NS must fit.
const MAX_SYMBOL_LEN: usize = 15;

/// Normalized market ticker.
///
/// Tickers are uppercase ASCII segments joined by `.` or `-`; the dotted
/// form carries an exchange suffix (`RELIANCE.NS` trades on the NSE).
/// Separators must join two non-empty segments, so a dangling or doubled
/// separator never reaches the upstream query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a ticker to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_uppercase();

        match normalized.chars().next() {
            None => return Err(ValidationError::EmptySymbol),
            Some(first) if !first.is_ascii_alphabetic() => {
                return Err(ValidationError::SymbolInvalidStart { ch: first });
            }
            Some(_) => {}
        }

        let len = normalized.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        let mut previous_was_separator = false;
        for (index, ch) in normalized.chars().enumerate() {
            let is_separator = matches!(ch, '.' | '-');
            if is_separator {
                // A separator needs a segment on both sides.
                if previous_was_separator || index == len - 1 {
                    return Err(ValidationError::SymbolInvalidChar { ch, index });
                }
            } else if !ch.is_ascii_alphanumeric() {
                return Err(ValidationError::SymbolInvalidChar { ch, index });
            }
            previous_was_separator = is_separator;
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exchange suffix of a dotted ticker: `RELIANCE.NS` gives `NS`,
    /// plain US tickers give `None`.
    pub fn exchange_suffix(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(_, suffix)| suffix)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}
