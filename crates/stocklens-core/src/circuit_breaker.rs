use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Observable circuit state for provider upstream calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

/// Circuit breaker thresholds and timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub open_timeout: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            open_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    consecutive_failures: u32,
    opened_at: Option<Instant>,
}

/// Thread-safe circuit breaker for adapter network requests.
///
/// The state is derived rather than stored: an open timer that has run
/// out *is* the half-open state, so there is no separate transition to
/// get wrong.
#[derive(Debug)]
pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    tally: Mutex<Tally>,
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(CircuitBreakerConfig::default())
    }
}

impl CircuitBreaker {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            tally: Mutex::new(Tally::default()),
        }
    }

    /// Whether an upstream call may proceed. While open, only a probe
    /// after the timeout is let through.
    pub fn allow_request(&self) -> bool {
        let tally = self.tally.lock().expect("breaker lock is not poisoned");
        match tally.opened_at {
            None => true,
            Some(opened_at) => opened_at.elapsed() >= self.config.open_timeout,
        }
    }

    pub fn record_success(&self) {
        let mut tally = self.tally.lock().expect("breaker lock is not poisoned");
        tally.consecutive_failures = 0;
        tally.opened_at = None;
    }

    pub fn record_failure(&self) {
        let mut tally = self.tally.lock().expect("breaker lock is not poisoned");
        tally.consecutive_failures = tally.consecutive_failures.saturating_add(1);

        // A failed half-open probe re-arms the timer as well.
        if tally.consecutive_failures >= self.config.failure_threshold {
            tally.opened_at = Some(Instant::now());
        }
    }

    pub fn state(&self) -> CircuitState {
        let tally = self.tally.lock().expect("breaker lock is not poisoned");
        match tally.opened_at {
            None => CircuitState::Closed,
            Some(opened_at) if opened_at.elapsed() >= self.config.open_timeout => {
                CircuitState::HalfOpen
            }
            Some(_) => CircuitState::Open,
        }
    }

    pub fn consecutive_failures(&self) -> u32 {
        let tally = self.tally.lock().expect("breaker lock is not poisoned");
        tally.consecutive_failures
    }
}
