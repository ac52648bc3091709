use serde::{Deserialize, Serialize};

use super::{IsoDate, RawCell};

/// One raw OHLCV row as delivered by the upstream provider.
///
/// Two rows are exact duplicates when every field — date included —
/// compares equal; the sanitizer removes those. Rows sharing a date but
/// differing in any value are both kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    pub date: IsoDate,
    #[serde(default)]
    pub open: RawCell,
    #[serde(default)]
    pub high: RawCell,
    #[serde(default)]
    pub low: RawCell,
    #[serde(default)]
    pub close: RawCell,
    #[serde(default)]
    pub volume: RawCell,
}

impl RawBar {
    pub fn new(
        date: IsoDate,
        open: impl Into<RawCell>,
        high: impl Into<RawCell>,
        low: impl Into<RawCell>,
        close: impl Into<RawCell>,
        volume: impl Into<RawCell>,
    ) -> Self {
        Self {
            date,
            open: open.into(),
            high: high.into(),
            low: low.into(),
            close: close.into(),
            volume: volume.into(),
        }
    }
}

/// Sanitized OHLCV row. `close` is guaranteed numeric; the other fields
/// are numeric or explicitly absent, never text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CleanBar {
    pub date: IsoDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<f64>,
}

/// Snapshot info record for one symbol, as returned by the provider's
/// batched quote endpoint. Field names follow the upstream wire contract.
///
/// `regular_market_change_percent` keeps an absent key (outer `None`)
/// apart from an explicit JSON null (`Some(None)`). The gainers ranking
/// treats the two differently: absent defaults to zero, null drops the
/// entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerInfo {
    pub symbol: String,
    #[serde(rename = "longName", default)]
    pub long_name: Option<String>,
    #[serde(
        rename = "regularMarketChangePercent",
        default,
        deserialize_with = "present_or_null"
    )]
    pub regular_market_change_percent: Option<Option<f64>>,
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_bar_equality_covers_every_column() {
        let date = IsoDate::parse("2024-01-02").expect("valid date");
        let a = RawBar::new(date, 10.0, 11.0, 9.0, 10.5, 1_000.0);
        let b = a.clone();
        assert_eq!(a, b);

        let differs = RawBar::new(date, 10.0, 11.0, 9.0, "10.5", 1_000.0);
        assert_ne!(a, differs);
    }

    #[test]
    fn ticker_info_reads_yahoo_field_names() {
        let info: TickerInfo = serde_json::from_str(
            r#"{"symbol":"AAPL","longName":"Apple Inc.","regularMarketChangePercent":1.25}"#,
        )
        .expect("must deserialize");
        assert_eq!(info.symbol, "AAPL");
        assert_eq!(info.long_name.as_deref(), Some("Apple Inc."));
        assert_eq!(info.regular_market_change_percent, Some(Some(1.25)));
    }

    #[test]
    fn ticker_info_tolerates_sparse_records() {
        let info: TickerInfo =
            serde_json::from_str(r#"{"symbol":"ZZZZ"}"#).expect("must deserialize");
        assert_eq!(info.long_name, None);
        assert_eq!(info.regular_market_change_percent, None);
    }

    #[test]
    fn ticker_info_keeps_null_apart_from_absent() {
        let nulled: TickerInfo =
            serde_json::from_str(r#"{"symbol":"X","regularMarketChangePercent":null}"#)
                .expect("must deserialize");
        assert_eq!(nulled.regular_market_change_percent, Some(None));

        let absent: TickerInfo = serde_json::from_str(r#"{"symbol":"X"}"#).expect("must deserialize");
        assert_eq!(absent.regular_market_change_percent, None);
    }
}
