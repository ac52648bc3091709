//! Provider adapters.
//!
//! One adapter today: Yahoo Finance. The adapter speaks the raw upstream
//! wire format and produces [`RawBar`](crate::RawBar) rows — cleaning is
//! the sanitizer's job, not the adapter's.

mod yahoo;

pub use yahoo::YahooMarket;
