//! Summary records and the operation-boundary error type.
//!
//! Field names and nesting are the wire contract of the HTTP layer; the
//! awkward `52_week_*` keys are kept verbatim for compatibility with the
//! legacy consumers.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use stocklens_core::{CleanBar, IsoDate};

/// Boundary error record. Operations return this instead of raising:
/// the HTTP layer serializes it as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error: String,
}

impl ErrorRecord {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    pub fn no_data_for_ticker() -> Self {
        Self::new("No data found for the given ticker.")
    }

    pub fn no_data_for_pair() -> Self {
        Self::new("No data found for one or both of the given tickers.")
    }

    /// Catch-all conversion applied at every operation boundary.
    pub fn from_fault(fault: impl Display) -> Self {
        Self::new(fault.to_string())
    }
}

impl Display for ErrorRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.error)
    }
}

impl std::error::Error for ErrorRecord {}

/// One bar of the snapshot payload, in the fixed wire field order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapshotBar {
    pub date: IsoDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<f64>,
}

impl From<CleanBar> for SnapshotBar {
    fn from(bar: CleanBar) -> Self {
        Self {
            date: bar.date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }
}

/// Trailing-30-day snapshot for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotReport {
    pub ticker: String,
    pub company_name: String,
    pub data: Vec<SnapshotBar>,
}

/// 52-week aggregate. A field is `null` when its source column had no
/// present values at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiftyTwoWeekReport {
    #[serde(rename = "52_week_high")]
    pub high: Option<f64>,
    #[serde(rename = "52_week_low")]
    pub low: Option<f64>,
    #[serde(rename = "52_week_average_close")]
    pub average_close: Option<f64>,
}

/// One side of a two-ticker comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonLeg {
    pub ticker: String,
    #[serde(rename = "52_week_high")]
    pub high: Option<f64>,
    #[serde(rename = "52_week_low")]
    pub low: Option<f64>,
    pub average_close: Option<f64>,
    pub percentage_change: f64,
}

/// Two-ticker comparison over the trailing year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub ticker1: ComparisonLeg,
    pub ticker2: ComparisonLeg,
}

/// One ranked top-gainers entry: a snapshot fact, not a time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainerEntry {
    pub ticker: String,
    pub name: String,
    pub change_percent: f64,
}
