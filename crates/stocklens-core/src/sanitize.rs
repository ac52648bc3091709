//! The table sanitizer: dedup, coerce, filter, reindex.
//!
//! Raw provider tables arrive with duplicated rows, stringly-typed
//! prices, and holes. This pass turns them into rows the aggregation
//! layer can trust. The policy is deliberately gentle: a row is dropped
//! only when its *close* cannot be coerced to a number, because close is
//! the one field every downstream aggregate depends on. Missing opens,
//! highs, lows, or volumes ride along as explicit gaps.
//!
//! The pipeline never signals an error; an empty or wholly unusable
//! table sanitizes to an empty vector. It is also idempotent: sanitized
//! rows pass through unchanged.

use crate::domain::{CleanBar, RawBar};

/// Sanitize a raw series into aggregation-ready bars.
///
/// Steps, in order:
/// 1. Remove rows that are exact duplicates across all columns, keeping
///    the first occurrence and the survivors' relative order.
/// 2. Coerce each price/volume cell to a number; unparseable cells
///    become missing.
/// 3. Drop rows whose coerced close is missing.
///
/// The output vector is contiguously indexed from zero by construction,
/// so "first row" and "last row" are well-defined positions.
pub fn sanitize(bars: &[RawBar]) -> Vec<CleanBar> {
    let mut survivors: Vec<&RawBar> = Vec::with_capacity(bars.len());
    for bar in bars {
        // Series are short (daily bars), so a linear scan beats carrying
        // a hashable projection of float cells.
        if !survivors.iter().any(|seen| *seen == bar) {
            survivors.push(bar);
        }
    }

    survivors
        .into_iter()
        .filter_map(|bar| {
            let close = bar.close.to_numeric()?;
            Some(CleanBar {
                date: bar.date,
                open: bar.open.to_numeric(),
                high: bar.high.to_numeric(),
                low: bar.low.to_numeric(),
                close,
                volume: bar.volume.to_numeric(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IsoDate, RawCell};

    fn date(value: &str) -> IsoDate {
        IsoDate::parse(value).expect("valid date")
    }

    #[test]
    fn removes_exact_duplicates_keeping_first() {
        let row = RawBar::new(date("2024-01-02"), 10.0, 11.0, 9.0, 10.5, 500.0);
        let other = RawBar::new(date("2024-01-03"), 10.5, 11.2, 10.1, 11.0, 600.0);
        let clean = sanitize(&[row.clone(), other.clone(), row.clone()]);

        assert_eq!(clean.len(), 2);
        assert_eq!(clean[0].date, date("2024-01-02"));
        assert_eq!(clean[1].date, date("2024-01-03"));
    }

    #[test]
    fn same_date_different_values_is_not_a_duplicate() {
        let first = RawBar::new(date("2024-01-02"), 10.0, 11.0, 9.0, 10.5, 500.0);
        let second = RawBar::new(date("2024-01-02"), 10.0, 11.0, 9.0, 10.7, 500.0);
        let clean = sanitize(&[first, second]);
        assert_eq!(clean.len(), 2);
    }

    #[test]
    fn drops_rows_with_unusable_close_only() {
        let usable = RawBar::new(date("2024-01-02"), "bad", RawCell::Missing, 9.0, "10.5", 500.0);
        let unusable = RawBar::new(date("2024-01-03"), 10.0, 11.0, 9.0, "n/a", 500.0);
        let clean = sanitize(&[usable, unusable]);

        assert_eq!(clean.len(), 1);
        let bar = clean[0];
        assert_eq!(bar.close, 10.5);
        assert_eq!(bar.open, None);
        assert_eq!(bar.high, None);
        assert_eq!(bar.low, Some(9.0));
        assert_eq!(bar.volume, Some(500.0));
    }

    #[test]
    fn duplicate_bad_rows_collapse_then_drop() {
        // Documented scenario: duplicates collapse first, then the bad
        // close disqualifies the survivor.
        let good = RawBar::new(
            date("2024-01-01"),
            RawCell::Missing,
            RawCell::Missing,
            RawCell::Missing,
            "100",
            RawCell::Missing,
        );
        let bad = RawBar::new(
            date("2024-01-02"),
            RawCell::Missing,
            RawCell::Missing,
            RawCell::Missing,
            "bad",
            RawCell::Missing,
        );
        let clean = sanitize(&[good, bad.clone(), bad]);

        assert_eq!(clean.len(), 1);
        assert_eq!(clean[0].date, date("2024-01-01"));
        assert_eq!(clean[0].close, 100.0);
    }

    #[test]
    fn empty_and_all_missing_tables_sanitize_to_empty() {
        assert!(sanitize(&[]).is_empty());

        let hollow = RawBar::new(
            date("2024-01-02"),
            RawCell::Missing,
            RawCell::Missing,
            RawCell::Missing,
            RawCell::Missing,
            RawCell::Missing,
        );
        assert!(sanitize(&[hollow]).is_empty());
    }

    #[test]
    fn sanitizing_is_idempotent() {
        let rows = vec![
            RawBar::new(date("2024-01-02"), 10.0, 11.0, 9.0, 10.5, 500.0),
            RawBar::new(date("2024-01-03"), "oops", 11.5, 9.5, 11.0, 600.0),
            RawBar::new(date("2024-01-03"), "oops", 11.5, 9.5, 11.0, 600.0),
        ];
        let once = sanitize(&rows);

        // Feed the cleaned rows back through as raw cells.
        let reraw: Vec<RawBar> = once
            .iter()
            .map(|bar| {
                RawBar::new(bar.date, bar.open, bar.high, bar.low, bar.close, bar.volume)
            })
            .collect();
        let twice = sanitize(&reraw);

        assert_eq!(once, twice);
    }

    #[test]
    fn never_increases_row_count() {
        let rows = vec![
            RawBar::new(date("2024-01-02"), 10.0, 11.0, 9.0, 10.5, 500.0),
            RawBar::new(date("2024-01-03"), 10.5, 11.2, 10.1, "bad", 600.0),
        ];
        assert!(sanitize(&rows).len() <= rows.len());
    }
}
