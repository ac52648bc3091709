//! # Stocklens Summary
//!
//! The aggregation layer: four public operations that turn sanitized
//! market tables into the summary records the HTTP endpoints serve.
//!
//! | Operation | Result |
//! |-----------|--------|
//! | [`snapshot`] | Trailing-30-day bars plus company name |
//! | [`fifty_two_week`] | 52-week high / low / average close |
//! | [`compare`] | Two-ticker comparison with percentage change |
//! | [`top_gainers`] | Top 5 of a fixed universe by change percent |
//!
//! Every operation is a total function over a [`MarketData`] provider:
//! upstream faults, validation failures, and computation edge cases all
//! come back as an [`ErrorRecord`] — callers never see a raised fault.
//!
//! [`MarketData`]: stocklens_core::MarketData

pub mod ops;
pub mod report;
pub mod stats;
pub mod universe;

pub use ops::{compare, fifty_two_week, snapshot, top_gainers};
pub use report::{
    Comparison, ComparisonLeg, ErrorRecord, FiftyTwoWeekReport, GainerEntry, SnapshotBar,
    SnapshotReport,
};
pub use universe::{ticker_universe, TICKER_UNIVERSE};
