use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::Deserialize;
use time::OffsetDateTime;

use crate::circuit_breaker::CircuitBreaker;
use crate::domain::{IsoDate, RawBar, RawCell, Symbol, TickerInfo};
use crate::http_client::{HttpAuth, HttpClient, HttpRequest, HttpResponse, NoopHttpClient};
use crate::market::{HistoryRequest, InfoRequest, MarketData, SourceError, Window};

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const QUOTE_URL: &str = "https://query1.finance.yahoo.com/v7/finance/quote";
const CRUMB_URLS: [&str; 2] = [
    "https://query1.finance.yahoo.com/v1/test/getcrumb",
    "https://query2.finance.yahoo.com/v1/test/getcrumb",
];
const REFERER: &str = "https://finance.yahoo.com/";
const CRUMB_TTL: Duration = Duration::from_secs(3600);
const UPSTREAM_TIMEOUT_MS: u64 = 10_000;

// ============================================================================
// Crumb authentication
// ============================================================================

#[derive(Debug, Clone)]
struct CrumbState {
    value: String,
    fetched_at: Instant,
}

/// Yahoo's unofficial API wants a session cookie (obtained by visiting
/// fc.yahoo.com, held in the transport's cookie jar) and a crumb token
/// appended to query strings. The crumb is cached for an hour and
/// invalidated whenever the upstream answers 401/429.
#[derive(Debug, Default)]
struct YahooAuth {
    crumb: Mutex<Option<CrumbState>>,
}

impl YahooAuth {
    /// Cookie override for environments where the jar cannot be primed.
    fn cookie_auth() -> HttpAuth {
        std::env::var("YAHOO_COOKIE")
            .ok()
            .map(HttpAuth::Cookie)
            .unwrap_or(HttpAuth::None)
    }

    async fn crumb(&self, http: &Arc<dyn HttpClient>) -> Result<String, SourceError> {
        {
            let cached = self.crumb.lock().expect("crumb lock is not poisoned");
            if let Some(state) = cached.as_ref() {
                if state.fetched_at.elapsed() < CRUMB_TTL {
                    return Ok(state.value.clone());
                }
            }
        }

        let value = Self::refresh(http).await?;
        let mut cached = self.crumb.lock().expect("crumb lock is not poisoned");
        *cached = Some(CrumbState {
            value: value.clone(),
            fetched_at: Instant::now(),
        });
        Ok(value)
    }

    fn invalidate(&self) {
        let mut cached = self.crumb.lock().expect("crumb lock is not poisoned");
        *cached = None;
    }

    async fn refresh(http: &Arc<dyn HttpClient>) -> Result<String, SourceError> {
        // Visiting fc.yahoo.com seeds the session cookie in the jar.
        let seed = HttpRequest::get("https://fc.yahoo.com")
            .with_header("referer", REFERER)
            .with_timeout_ms(UPSTREAM_TIMEOUT_MS);
        http.execute(seed).await.map_err(|error| {
            SourceError::unavailable(format!("failed to fetch yahoo cookie: {}", error.message()))
        })?;

        for endpoint in CRUMB_URLS {
            let request = HttpRequest::get(endpoint)
                .with_header("referer", REFERER)
                .with_timeout_ms(UPSTREAM_TIMEOUT_MS);

            let Ok(response) = http.execute(request).await else {
                continue;
            };
            if !response.is_success() {
                continue;
            }

            let body = response.body.trim();
            if body.to_ascii_lowercase().contains("too many requests") {
                return Err(SourceError::rate_limited(
                    "yahoo rate limited while fetching crumb",
                ));
            }
            // Crumbs are short opaque tokens; HTML means an error page.
            if !body.is_empty() && body.len() < 100 && !body.contains(' ') && !body.contains('<') {
                return Ok(body.to_owned());
            }
        }

        Err(SourceError::unavailable(
            "failed to fetch a yahoo crumb from all endpoints",
        ))
    }
}

// ============================================================================
// Adapter
// ============================================================================

/// Yahoo Finance adapter with real and deterministic mock modes.
///
/// With a real transport it drives the chart and quote endpoints; with a
/// mock transport it produces seeded offline data so tests exercise the
/// full pipeline without the network.
#[derive(Clone)]
pub struct YahooMarket {
    http_client: Arc<dyn HttpClient>,
    auth: Arc<YahooAuth>,
    breaker: Arc<CircuitBreaker>,
    use_real_api: bool,
}

impl Default for YahooMarket {
    fn default() -> Self {
        Self {
            http_client: Arc::new(NoopHttpClient),
            auth: Arc::new(YahooAuth::default()),
            breaker: Arc::new(CircuitBreaker::default()),
            use_real_api: false,
        }
    }
}

impl YahooMarket {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        let use_real_api = !http_client.is_mock();
        Self {
            http_client,
            use_real_api,
            ..Self::default()
        }
    }

    pub fn with_circuit_breaker(mut self, breaker: Arc<CircuitBreaker>) -> Self {
        self.breaker = breaker;
        self
    }

    /// Issue an authenticated GET, refreshing the crumb once on 401/429.
    /// 404 is passed back to the caller: for Yahoo it means "no such
    /// symbol", which is data, not an outage.
    async fn send_authenticated(&self, base: &str) -> Result<HttpResponse, SourceError> {
        if !self.breaker.allow_request() {
            return Err(SourceError::unavailable(
                "yahoo circuit breaker is open; skipping upstream call",
            ));
        }

        let crumb = self.auth.crumb(&self.http_client).await?;
        let mut response = self.dispatch(base, &crumb).await?;

        if response.status == 401 || response.status == 429 {
            self.auth.invalidate();
            let crumb = self.auth.crumb(&self.http_client).await?;
            response = self.dispatch(base, &crumb).await?;
        }

        if response.is_success() || response.status == 404 {
            self.breaker.record_success();
            Ok(response)
        } else {
            self.breaker.record_failure();
            Err(SourceError::unavailable(format!(
                "yahoo upstream returned status {}",
                response.status
            )))
        }
    }

    async fn dispatch(&self, base: &str, crumb: &str) -> Result<HttpResponse, SourceError> {
        let separator = if base.contains('?') { '&' } else { '?' };
        let url = format!("{base}{separator}crumb={}", urlencoding::encode(crumb));
        let request = HttpRequest::get(url)
            .with_header("referer", REFERER)
            .with_auth(&YahooAuth::cookie_auth())
            .with_timeout_ms(UPSTREAM_TIMEOUT_MS);

        self.http_client.execute(request).await.map_err(|error| {
            self.breaker.record_failure();
            if error.retryable() {
                SourceError::unavailable(format!("yahoo transport error: {}", error.message()))
            } else {
                SourceError::internal(format!("yahoo transport error: {}", error.message()))
            }
        })
    }

    /// Mock-mode stand-in for a network round trip, so breaker behavior
    /// is observable in tests.
    async fn probe(&self, endpoint: &str) -> Result<(), SourceError> {
        if !self.breaker.allow_request() {
            return Err(SourceError::unavailable(
                "yahoo circuit breaker is open; skipping upstream call",
            ));
        }

        let request = HttpRequest::get(endpoint).with_header("referer", REFERER);
        let response = self.http_client.execute(request).await.map_err(|error| {
            self.breaker.record_failure();
            SourceError::unavailable(format!("yahoo transport error: {}", error.message()))
        })?;

        if !response.is_success() {
            self.breaker.record_failure();
            return Err(SourceError::unavailable(format!(
                "yahoo upstream returned status {}",
                response.status
            )));
        }

        self.breaker.record_success();
        Ok(())
    }
}

impl MarketData for YahooMarket {
    fn history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawBar>, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            if self.use_real_api {
                self.fetch_real_history(&req).await
            } else {
                self.fetch_fake_history(&req).await
            }
        })
    }

    fn info<'a>(
        &'a self,
        req: InfoRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<TickerInfo>, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            if req.symbols.is_empty() {
                return Err(SourceError::invalid_request(
                    "yahoo info request requires at least one symbol",
                ));
            }

            if self.use_real_api {
                self.fetch_real_info(&req).await
            } else {
                self.fetch_fake_info(&req).await
            }
        })
    }
}

// Real API mode
impl YahooMarket {
    async fn fetch_real_history(&self, req: &HistoryRequest) -> Result<Vec<RawBar>, SourceError> {
        let symbol = urlencoding::encode(req.symbol.as_str()).into_owned();
        let base = match req.window {
            Window::Range { start, end } => format!(
                "{CHART_URL}/{symbol}?interval=1d&period1={}&period2={}",
                start.unix_midnight(),
                // period2 is exclusive upstream; push it past the end day.
                end.unix_midnight() + 86_400,
            ),
            Window::TrailingYear => format!("{CHART_URL}/{symbol}?interval=1d&range=1y"),
        };

        let response = self.send_authenticated(&base).await?;
        if response.status == 404 {
            return Ok(Vec::new());
        }
        parse_chart_body(&response.body)
    }

    async fn fetch_real_info(&self, req: &InfoRequest) -> Result<Vec<TickerInfo>, SourceError> {
        let symbols = req
            .symbols
            .iter()
            .map(Symbol::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let base = format!(
            "{QUOTE_URL}?symbols={}&fields=longName,regularMarketChangePercent",
            urlencoding::encode(&symbols)
        );

        let response = self.send_authenticated(&base).await?;
        if response.status == 404 {
            return Ok(Vec::new());
        }
        parse_quote_body(&response.body)
    }
}

// Deterministic mock mode
impl YahooMarket {
    async fn fetch_fake_history(&self, req: &HistoryRequest) -> Result<Vec<RawBar>, SourceError> {
        self.probe(CHART_URL).await?;

        let (start, days) = match req.window {
            Window::Range { start, end } => {
                let span = (end.into_inner() - start.into_inner()).whole_days();
                (start, span.max(0) as u32 + 1)
            }
            Window::TrailingYear => (IsoDate::today().days_before(364), 365),
        };

        let seed = symbol_seed(&req.symbol);
        let mut bars = Vec::with_capacity(days as usize);
        for index in 0..days {
            let date = start.days_after(index);
            let base = 90.0 + ((seed + u64::from(index)) % 350) as f64 / 10.0;
            bars.push(RawBar::new(
                date,
                base,
                base + 1.20,
                base - 0.80,
                base + 0.30,
                20_000.0 + f64::from(index) * 25.0,
            ));
        }

        Ok(bars)
    }

    async fn fetch_fake_info(&self, req: &InfoRequest) -> Result<Vec<TickerInfo>, SourceError> {
        self.probe(QUOTE_URL).await?;

        let infos = req
            .symbols
            .iter()
            .map(|symbol| {
                let seed = symbol_seed(symbol);
                TickerInfo {
                    symbol: symbol.to_string(),
                    long_name: Some(format!("{symbol} Inc.")),
                    regular_market_change_percent: Some(Some((seed % 900) as f64 / 100.0 - 4.5)),
                }
            })
            .collect();

        Ok(infos)
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartBody,
}

#[derive(Debug, Deserialize)]
struct YahooChartBody {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooChartIndicators {
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteResponse {
    #[serde(rename = "quoteResponse")]
    quote_response: YahooQuoteBody,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteBody {
    #[serde(default)]
    result: Vec<TickerInfo>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

fn parse_chart_body(body: &str) -> Result<Vec<RawBar>, SourceError> {
    let parsed: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo chart: {e}")))?;

    // A chart-level error means "no data for this symbol", not an
    // outage; the empty table is the signal downstream expects.
    if parsed.chart.error.as_ref().is_some_and(|e| !e.is_null()) {
        return Ok(Vec::new());
    }

    let Some(result) = parsed.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };
    let Some(timestamps) = result.timestamp else {
        return Ok(Vec::new());
    };
    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .unwrap_or_default();

    let mut bars = Vec::with_capacity(timestamps.len());
    for (index, ts) in timestamps.iter().enumerate() {
        let date = OffsetDateTime::from_unix_timestamp(*ts)
            .map_err(|e| SourceError::internal(format!("invalid chart timestamp: {e}")))?
            .date();
        bars.push(RawBar {
            date: IsoDate::from_date(date),
            open: column_cell(&quote.open, index),
            high: column_cell(&quote.high, index),
            low: column_cell(&quote.low, index),
            close: column_cell(&quote.close, index),
            volume: column_cell(&quote.volume, index),
        });
    }

    Ok(bars)
}

fn column_cell(column: &[Option<f64>], index: usize) -> RawCell {
    column.get(index).copied().flatten().into()
}

fn parse_quote_body(body: &str) -> Result<Vec<TickerInfo>, SourceError> {
    let parsed: YahooQuoteResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo quotes: {e}")))?;

    if parsed
        .quote_response
        .error
        .as_ref()
        .is_some_and(|e| !e.is_null())
    {
        return Err(SourceError::unavailable(format!(
            "yahoo quote API error: {}",
            parsed.quote_response.error.unwrap_or_default()
        )));
    }

    Ok(parsed.quote_response.result)
}

fn symbol_seed(symbol: &Symbol) -> u64 {
    symbol.as_str().bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(u64::from(byte))
    })
}
