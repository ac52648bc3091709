//! # Stocklens Core
//!
//! Domain contracts and data plumbing for the stocklens market-summary
//! service.
//!
//! ## Overview
//!
//! This crate provides the foundations the summary layer builds on:
//!
//! - **Canonical domain models** for raw and sanitized market bars
//! - **Table sanitizer** implementing the dedup/coerce/filter pipeline
//! - **`MarketData` trait** abstracting the upstream quote provider
//! - **Yahoo Finance adapter** with real and deterministic mock modes
//! - **Circuit breaker** guarding upstream calls
//! - **Response cache** used by the HTTP layer
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Yahoo Finance) |
//! | [`cache`] | TTL cache for rendered responses |
//! | [`circuit_breaker`] | Circuit breaker for resilient upstream calls |
//! | [`domain`] | Domain models (RawBar, CleanBar, Symbol, IsoDate) |
//! | [`error`] | Core validation error types |
//! | [`http_client`] | HTTP client abstraction |
//! | [`market`] | `MarketData` trait and request/response types |
//! | [`sanitize`] | The table-sanitizer pipeline |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stocklens_core::{HistoryRequest, MarketData, Symbol, YahooMarket};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let market = YahooMarket::default();
//!     let symbol = Symbol::parse("AAPL")?;
//!     let raw = market.history(HistoryRequest::trailing_year(symbol)).await?;
//!     let clean = stocklens_core::sanitize(&raw);
//!     println!("{} usable bars", clean.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Adapter operations return structured [`SourceError`] values; the
//! sanitizer itself never errors — unusable cells become missing values
//! and unusable rows are dropped.

pub mod adapters;
pub mod cache;
pub mod circuit_breaker;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod market;
pub mod sanitize;

// Re-export commonly used types at crate root for convenience

pub use adapters::YahooMarket;

pub use cache::CacheStore;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};

pub use domain::{CleanBar, IsoDate, RawBar, RawCell, Symbol, TickerInfo};

pub use error::ValidationError;

pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};

pub use market::{
    HistoryRequest, InfoRequest, MarketData, SourceError, SourceErrorKind, Window,
};

pub use sanitize::sanitize;
