//! Behavior tests for the table sanitizer.

use stocklens_core::{sanitize, RawBar, RawCell};
use stocklens_tests::{bar, close_only, iso};

#[test]
fn duplicate_rows_collapse_and_unusable_rows_drop() {
    // given a table with an exact duplicate and a row whose close is text
    let keeper = bar("2024-01-02", 10.0, 11.0, 9.0, 10.5, 1_000.0);
    let raw = vec![
        keeper.clone(),
        keeper.clone(),
        RawBar::new(iso("2024-01-03"), 10.5, 11.5, 9.5, "not a price", 1_100.0),
        bar("2024-01-04", 10.6, 11.6, 9.6, 10.9, 1_200.0),
    ];

    // when sanitized
    let clean = sanitize(&raw);

    // then one copy of the duplicate survives and the text-close row is gone
    assert_eq!(clean.len(), 2);
    assert_eq!(clean[0].date, iso("2024-01-02"));
    assert_eq!(clean[0].close, 10.5);
    assert_eq!(clean[1].date, iso("2024-01-04"));
    assert_eq!(clean[1].close, 10.9);
}

#[test]
fn rows_missing_non_close_fields_are_kept() {
    // given a row that carries nothing but a close
    let raw = vec![close_only("2024-01-02", 42.0)];

    // when sanitized
    let clean = sanitize(&raw);

    // then the row survives with the gaps made explicit
    assert_eq!(clean.len(), 1);
    assert_eq!(clean[0].close, 42.0);
    assert_eq!(clean[0].open, None);
    assert_eq!(clean[0].high, None);
    assert_eq!(clean[0].low, None);
    assert_eq!(clean[0].volume, None);
}

#[test]
fn numeric_text_cells_coerce_instead_of_dropping() {
    // given a row whose cells arrived as strings
    let raw = vec![RawBar::new(
        iso("2024-01-02"),
        "10.0",
        " 11.0 ",
        "9.0",
        "10.5",
        "1000",
    )];

    let clean = sanitize(&raw);

    assert_eq!(clean.len(), 1);
    assert_eq!(clean[0].open, Some(10.0));
    assert_eq!(clean[0].high, Some(11.0));
    assert_eq!(clean[0].close, 10.5);
    assert_eq!(clean[0].volume, Some(1_000.0));
}

#[test]
fn sanitizing_a_clean_table_changes_nothing() {
    // given a messy table sanitized once
    let raw = vec![
        bar("2024-01-02", 10.0, 11.0, 9.0, 10.5, 1_000.0),
        bar("2024-01-02", 10.0, 11.0, 9.0, 10.5, 1_000.0),
        RawBar::new(iso("2024-01-03"), 1.0, 2.0, 0.5, RawCell::Missing, 100.0),
        close_only("2024-01-04", 11.0),
    ];
    let once = sanitize(&raw);

    // when the clean output is fed back through as raw input
    let re_rawed: Vec<RawBar> = once
        .iter()
        .map(|clean| {
            RawBar::new(
                clean.date,
                clean.open,
                clean.high,
                clean.low,
                clean.close,
                clean.volume,
            )
        })
        .collect();
    let twice = sanitize(&re_rawed);

    // then a second pass is a no-op
    assert_eq!(once, twice);
}

#[test]
fn row_order_survives_sanitization() {
    let raw = vec![
        close_only("2024-01-05", 3.0),
        RawBar::new(iso("2024-01-02"), 1.0, 2.0, 0.5, "junk", 10.0),
        close_only("2024-01-03", 1.0),
        close_only("2024-01-01", 2.0),
    ];

    let clean = sanitize(&raw);

    // dates come out in input order, not sorted
    let dates: Vec<_> = clean.iter().map(|bar| bar.date).collect();
    assert_eq!(
        dates,
        vec![iso("2024-01-05"), iso("2024-01-03"), iso("2024-01-01")]
    );
}

#[test]
fn table_with_no_usable_close_sanitizes_to_empty() {
    let raw = vec![
        RawBar::new(iso("2024-01-02"), 1.0, 2.0, 0.5, RawCell::Missing, 10.0),
        RawBar::new(iso("2024-01-03"), 1.0, 2.0, 0.5, "n/a", 10.0),
    ];

    assert!(sanitize(&raw).is_empty());
}
