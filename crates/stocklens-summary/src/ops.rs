//! The four public summary operations.
//!
//! Shape shared by all four: fetch raw bars (or info records) from the
//! provider, sanitize, reduce, and convert *any* fault at the boundary
//! into an [`ErrorRecord`]. The emptiness check runs against the raw
//! fetch, before sanitization — a window that returned bars which all
//! sanitize away is still "data found", matching the legacy behavior.

use std::cmp::Ordering;

use stocklens_core::{
    sanitize, CleanBar, HistoryRequest, InfoRequest, IsoDate, MarketData, Symbol,
};

use crate::report::{
    Comparison, ComparisonLeg, ErrorRecord, FiftyTwoWeekReport, GainerEntry, SnapshotBar,
    SnapshotReport,
};
use crate::stats;
use crate::universe::ticker_universe;

/// Trailing window of the snapshot endpoint, in calendar days.
const SNAPSHOT_WINDOW_DAYS: u32 = 30;

/// Maximum entries returned by the top-gainers ranking.
const TOP_GAINERS_LIMIT: usize = 5;

/// Recent-window snapshot: the trailing 30 days of bars plus the
/// company's display name.
pub async fn snapshot(
    market: &dyn MarketData,
    ticker: &str,
) -> Result<SnapshotReport, ErrorRecord> {
    let symbol = Symbol::parse(ticker).map_err(ErrorRecord::from_fault)?;

    let end = IsoDate::today();
    let start = end.days_before(SNAPSHOT_WINDOW_DAYS);
    let request =
        HistoryRequest::range(symbol.clone(), start, end).map_err(ErrorRecord::from_fault)?;
    let raw = market
        .history(request)
        .await
        .map_err(ErrorRecord::from_fault)?;

    if raw.is_empty() {
        return Err(ErrorRecord::no_data_for_ticker());
    }

    let bars = sanitize(&raw);
    let company_name = company_name(market, &symbol).await?;

    Ok(SnapshotReport {
        ticker: symbol.to_string(),
        company_name,
        data: bars.into_iter().map(SnapshotBar::from).collect(),
    })
}

/// 52-week aggregate: high, low, and average close over the trailing
/// year.
pub async fn fifty_two_week(
    market: &dyn MarketData,
    ticker: &str,
) -> Result<FiftyTwoWeekReport, ErrorRecord> {
    let symbol = Symbol::parse(ticker).map_err(ErrorRecord::from_fault)?;

    let raw = market
        .history(HistoryRequest::trailing_year(symbol))
        .await
        .map_err(ErrorRecord::from_fault)?;

    if raw.is_empty() {
        return Err(ErrorRecord::no_data_for_ticker());
    }

    let bars = sanitize(&raw);
    Ok(FiftyTwoWeekReport {
        high: stats::max_of(bars.iter().map(|bar| bar.high)),
        low: stats::min_of(bars.iter().map(|bar| bar.low)),
        average_close: stats::mean_of(bars.iter().map(|bar| Some(bar.close))),
    })
}

/// Two-ticker comparison over the trailing year.
pub async fn compare(
    market: &dyn MarketData,
    ticker1: &str,
    ticker2: &str,
) -> Result<Comparison, ErrorRecord> {
    let first = Symbol::parse(ticker1).map_err(ErrorRecord::from_fault)?;
    let second = Symbol::parse(ticker2).map_err(ErrorRecord::from_fault)?;

    let first_raw = market
        .history(HistoryRequest::trailing_year(first.clone()))
        .await
        .map_err(ErrorRecord::from_fault)?;
    let second_raw = market
        .history(HistoryRequest::trailing_year(second.clone()))
        .await
        .map_err(ErrorRecord::from_fault)?;

    if first_raw.is_empty() || second_raw.is_empty() {
        return Err(ErrorRecord::no_data_for_pair());
    }

    Ok(Comparison {
        ticker1: comparison_leg(&first, &sanitize(&first_raw))?,
        ticker2: comparison_leg(&second, &sanitize(&second_raw))?,
    })
}

/// Top gainers across the fixed universe: one batched info fetch,
/// tolerant of partial failure, ranked descending by change percent.
pub async fn top_gainers(market: &dyn MarketData) -> Result<Vec<GainerEntry>, ErrorRecord> {
    let request = InfoRequest::new(ticker_universe()).map_err(ErrorRecord::from_fault)?;
    let infos = market.info(request).await.map_err(ErrorRecord::from_fault)?;

    // Symbols the upstream could not resolve are already absent from
    // `infos`. An absent change-percent key defaults to zero and stays
    // in; an explicit null from the upstream disqualifies the entry.
    let mut entries: Vec<GainerEntry> = infos
        .into_iter()
        .filter_map(|info| {
            let change_percent = match info.regular_market_change_percent {
                Some(Some(value)) => value,
                Some(None) => return None,
                None => 0.0,
            };
            Some(GainerEntry {
                ticker: info.symbol,
                name: info.long_name.unwrap_or_else(|| String::from("N/A")),
                change_percent,
            })
        })
        .collect();

    // Stable sort: ties keep the original fetch order.
    entries.sort_by(|a, b| {
        b.change_percent
            .partial_cmp(&a.change_percent)
            .unwrap_or(Ordering::Equal)
    });
    entries.truncate(TOP_GAINERS_LIMIT);

    Ok(entries)
}

async fn company_name(market: &dyn MarketData, symbol: &Symbol) -> Result<String, ErrorRecord> {
    let request = InfoRequest::new(vec![symbol.clone()]).map_err(ErrorRecord::from_fault)?;
    let infos = market.info(request).await.map_err(ErrorRecord::from_fault)?;

    Ok(infos
        .into_iter()
        .next()
        .and_then(|info| info.long_name)
        .unwrap_or_else(|| String::from("N/A")))
}

fn comparison_leg(symbol: &Symbol, bars: &[CleanBar]) -> Result<ComparisonLeg, ErrorRecord> {
    let first_close = bars.first().map(|bar| bar.close);
    let last_close = bars.last().map(|bar| bar.close);

    let percentage_change = match (first_close, last_close) {
        (Some(first), Some(last)) => stats::percentage_change(first, last),
        _ => None,
    }
    .ok_or_else(|| {
        tracing::warn!(ticker = %symbol, "percentage change undefined for series");
        ErrorRecord::new(format!("Unable to compute percentage change for {symbol}."))
    })?;

    Ok(ComparisonLeg {
        ticker: symbol.to_string(),
        high: stats::max_of(bars.iter().map(|bar| bar.high)),
        low: stats::min_of(bars.iter().map(|bar| bar.low)),
        average_close: stats::mean_of(bars.iter().map(|bar| Some(bar.close))),
        percentage_change,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stocklens_core::YahooMarket;

    #[tokio::test]
    async fn snapshot_on_mock_market_returns_full_window() {
        let market = YahooMarket::default();
        let report = snapshot(&market, "aapl").await.expect("snapshot succeeds");

        assert_eq!(report.ticker, "AAPL");
        assert_eq!(report.company_name, "AAPL Inc.");
        assert_eq!(report.data.len(), SNAPSHOT_WINDOW_DAYS as usize + 1);
    }

    #[tokio::test]
    async fn invalid_ticker_becomes_an_error_record() {
        let market = YahooMarket::default();
        let error = snapshot(&market, "!!").await.expect_err("must fail");
        assert!(error.error.contains("symbol"));
    }

    #[tokio::test]
    async fn fifty_two_week_bounds_hold_on_mock_data() {
        let market = YahooMarket::default();
        let report = fifty_two_week(&market, "MSFT")
            .await
            .expect("aggregate succeeds");

        let (high, low, average) = (
            report.high.expect("high defined"),
            report.low.expect("low defined"),
            report.average_close.expect("average defined"),
        );
        assert!(high >= low);
        assert!(low <= average && average <= high);
    }

    #[tokio::test]
    async fn top_gainers_is_ranked_and_capped() {
        let market = YahooMarket::default();
        let gainers = top_gainers(&market).await.expect("ranking succeeds");

        assert!(gainers.len() <= TOP_GAINERS_LIMIT);
        assert!(gainers
            .windows(2)
            .all(|pair| pair[0].change_percent >= pair[1].change_percent));
    }
}
