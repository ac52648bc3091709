//! # Domain Models
//!
//! Canonical domain types for stocklens market data.
//!
//! ## Overview
//!
//! This module provides strongly-typed domain models with built-in
//! validation where an invariant exists, and deliberately loose cells
//! (`RawCell`) where the upstream table is untrusted.
//!
//! ## Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RawBar`] | One untrusted OHLCV row as delivered upstream |
//! | [`RawCell`] | One untrusted table cell: number, text, or missing |
//! | [`CleanBar`] | Sanitized row with a guaranteed numeric close |
//! | [`TickerInfo`] | Snapshot info record for one symbol |
//! | [`Symbol`] | Validated stock symbol |
//! | [`IsoDate`] | Calendar date with ISO `YYYY-MM-DD` serde form |
//!
//! ## Validation
//!
//! `Symbol` and `IsoDate` enforce their invariants at construction time.
//! `RawBar` carries no invariant at all: every price cell may be text or
//! absent, and the sanitizer — not the constructor — decides what
//! survives.

mod bars;
mod cell;
mod date;
mod symbol;

pub use bars::{CleanBar, RawBar, TickerInfo};
pub use cell::RawCell;
pub use date::IsoDate;
pub use symbol::Symbol;
