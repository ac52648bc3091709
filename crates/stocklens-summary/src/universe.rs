//! The fixed ticker universe the top-gainers ranking scans.
//!
//! Static configuration, not derived data: twenty large caps across US
//! and Indian exchanges (tech, banking, auto, pharma, energy), exactly
//! as the legacy service shipped them.

use stocklens_core::Symbol;

pub const TICKER_UNIVERSE: [&str; 20] = [
    "AAPL",
    "MSFT",
    "GOOGL",
    "AMZN",
    "META",
    "NVDA",
    "AMD",
    "TSM",
    "INTC",
    "JPM",
    "BAC",
    "HDFC.NS",
    "ICICIBANK.NS",
    "TSLA",
    "TATAMOTORS.NS",
    "MARUTI.NS",
    "JNJ",
    "PFE",
    "XOM",
    "RELIANCE.NS",
];

/// The universe as validated symbols, in the fixed scan order.
pub fn ticker_universe() -> Vec<Symbol> {
    TICKER_UNIVERSE
        .iter()
        .map(|raw| Symbol::parse(raw).expect("universe symbols are valid"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_universe_symbol_is_valid() {
        assert_eq!(ticker_universe().len(), TICKER_UNIVERSE.len());
    }
}
