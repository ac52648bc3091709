//! Market-data provider trait and request/response types.
//!
//! This module defines the contract (`MarketData`) the aggregation layer
//! consumes, along with the structured error type adapters surface.
//!
//! # Endpoints
//!
//! | Endpoint | Request | Response | Description |
//! |----------|---------|----------|-------------|
//! | History | [`HistoryRequest`] | `Vec<RawBar>` | Raw, unsanitized OHLCV bars |
//! | Info | [`InfoRequest`] | `Vec<TickerInfo>` | Batched snapshot info records |
//!
//! History bars come back raw on purpose: the sanitizer owns the
//! cleaning policy, not the adapter. Info is batched and tolerant of
//! partial failure — a symbol the upstream cannot resolve is simply
//! absent from the result.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::domain::{IsoDate, RawBar, Symbol, TickerInfo};
use crate::ValidationError;

/// Requested history window: an explicit date range or a named trailing
/// period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Range { start: IsoDate, end: IsoDate },
    TrailingYear,
}

/// Request payload for the history endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub symbol: Symbol,
    pub window: Window,
}

impl HistoryRequest {
    pub fn range(symbol: Symbol, start: IsoDate, end: IsoDate) -> Result<Self, SourceError> {
        if start > end {
            return Err(SourceError::invalid_request(format!(
                "history window start {start} is after end {end}"
            )));
        }
        Ok(Self {
            symbol,
            window: Window::Range { start, end },
        })
    }

    pub fn trailing_year(symbol: Symbol) -> Self {
        Self {
            symbol,
            window: Window::TrailingYear,
        }
    }
}

/// Request payload for the batched info endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRequest {
    pub symbols: Vec<Symbol>,
}

impl InfoRequest {
    pub fn new(symbols: Vec<Symbol>) -> Result<Self, SourceError> {
        if symbols.is_empty() {
            return Err(SourceError::invalid_request(
                "info request must include at least one symbol",
            ));
        }
        Ok(Self { symbols })
    }
}

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    RateLimited,
    InvalidRequest,
    Internal,
}

/// Structured provider error surfaced by adapter calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

impl From<ValidationError> for SourceError {
    fn from(error: ValidationError) -> Self {
        Self::invalid_request(error.to_string())
    }
}

/// Market-data provider contract.
///
/// Implementations must be `Send + Sync`; the web layer shares one
/// provider handle across concurrent requests. Methods return boxed
/// futures so the trait stays object-safe behind `&dyn MarketData`.
pub trait MarketData: Send + Sync {
    /// Fetches raw, unsanitized bars for the requested window, ascending
    /// by date.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the provider is unavailable, rate
    /// limits the call, or returns an unreadable payload. An unknown
    /// ticker is *not* an error: it yields an empty vector, which the
    /// aggregation layer maps to its "no data" record.
    fn history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawBar>, SourceError>> + Send + 'a>>;

    /// Fetches snapshot info for a batch of symbols.
    ///
    /// Partial results are expected: symbols the upstream cannot resolve
    /// are skipped, not errored.
    fn info<'a>(
        &'a self,
        req: InfoRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<TickerInfo>, SourceError>> + Send + 'a>>;
}
