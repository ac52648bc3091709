use std::sync::Arc;
use std::time::Duration;

use stocklens_core::{CacheStore, MarketData};

/// Cached endpoints keep their bodies for this long, matching the
/// legacy service's 300-second response cache.
const RESPONSE_CACHE_TTL: Duration = Duration::from_secs(300);

/// Shared application state: one provider handle and one response cache
/// across all requests.
#[derive(Clone)]
pub struct AppState {
    pub market: Arc<dyn MarketData>,
    pub cache: CacheStore,
}

impl AppState {
    pub fn new(market: Arc<dyn MarketData>) -> Self {
        Self {
            market,
            cache: CacheStore::new(RESPONSE_CACHE_TTL),
        }
    }
}
