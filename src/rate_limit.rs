//! In-memory rate limiting for Nexus AI requests.
//!
//! DESIGN
//! ======
//! Sliding-window counters backed by `HashMap<Uuid, VecDeque<Instant>>`.
//! Three limits enforced:
//! - Per-user: 10 AI requests/min
//! - Global: 20 LLM API calls/min
//! - Token budget: 50k tokens/user/hour

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use uuid::Uuid;

const DEFAULT_PER_USER_LIMIT: usize = 10;
const DEFAULT_PER_USER_WINDOW_SECS: u64 = 60;

const DEFAULT_GLOBAL_LIMIT: usize = 20;
const DEFAULT_GLOBAL_WINDOW_SECS: u64 = 60;

const DEFAULT_TOKEN_BUDGET: u64 = 50_000;
const DEFAULT_TOKEN_WINDOW_SECS: u64 = 3600;

#[derive(Clone, Copy)]
struct RateLimitConfig {
    per_user_limit: usize,
    per_user_window: Duration,
    global_limit: usize,
    global_window: Duration,
    token_budget: u64,
    token_window: Duration,
}

impl RateLimitConfig {
    fn from_env() -> Self {
        let per_user_window_secs = env_parse("RATE_LIMIT_PER_USER_WINDOW_SECS", DEFAULT_PER_USER_WINDOW_SECS);
        let global_window_secs = env_parse("RATE_LIMIT_GLOBAL_WINDOW_SECS", DEFAULT_GLOBAL_WINDOW_SECS);
        let token_window_secs = env_parse("RATE_LIMIT_TOKEN_WINDOW_SECS", DEFAULT_TOKEN_WINDOW_SECS);

        Self {
            per_user_limit: env_parse("RATE_LIMIT_PER_USER", DEFAULT_PER_USER_LIMIT),
            per_user_window: Duration::from_secs(per_user_window_secs),
            global_limit: env_parse("RATE_LIMIT_GLOBAL", DEFAULT_GLOBAL_LIMIT),
            global_window: Duration::from_secs(global_window_secs),
            token_budget: env_parse("RATE_LIMIT_TOKEN_BUDGET", DEFAULT_TOKEN_BUDGET),
            token_window: Duration::from_secs(token_window_secs),
        }
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum RateLimitError {
    #[error("per-user rate limit exceeded (max {limit} requests/{window_secs}s)")]
    PerUserExceeded { limit: usize, window_secs: u64 },
    #[error("global rate limit exceeded (max {limit} requests/{window_secs}s)")]
    GlobalExceeded { limit: usize, window_secs: u64 },
    #[error("token budget exceeded (max {budget} tokens/{window_secs}s)")]
    TokenBudgetExceeded { budget: u64, window_secs: u64 },
}

// =============================================================================
// RATE LIMITER
// =============================================================================

#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<Mutex<RateLimiterInner>>,
    config: RateLimitConfig,
}

struct RateLimiterInner {
    /// Per-user request timestamps.
    user_requests: HashMap<Uuid, VecDeque<Instant>>,
    /// Global request timestamps.
    global_requests: VecDeque<Instant>,
    /// Per-user token usage: (timestamp, `token_count`).
    user_tokens: HashMap<Uuid, VecDeque<(Instant, u64)>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(RateLimiterInner {
                user_requests: HashMap::new(),
                global_requests: VecDeque::new(),
                user_tokens: HashMap::new(),
            })),
            config: RateLimitConfig::from_env(),
        }
    }

    /// Check both per-user and global rate limits, then record the request.
    ///
    /// # Errors
    ///
    /// Returns a [`RateLimitError`] naming the exceeded limit.
    pub fn check_and_record(&self, user_id: Uuid) -> Result<(), RateLimitError> {
        self.check_and_record_at(user_id, Instant::now())
    }

    /// Internal: check + record with explicit timestamp (for testing).
    fn check_and_record_at(&self, user_id: Uuid, now: Instant) -> Result<(), RateLimitError> {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let cfg = self.config;

        // Prune and check global first (no borrow conflict).
        prune_window(&mut inner.global_requests, now, cfg.global_window);
        if inner.global_requests.len() >= cfg.global_limit {
            return Err(RateLimitError::GlobalExceeded {
                limit: cfg.global_limit,
                window_secs: cfg.global_window.as_secs(),
            });
        }

        // Prune and check per-user.
        let user_deque = inner.user_requests.entry(user_id).or_default();
        prune_window(user_deque, now, cfg.per_user_window);
        if user_deque.len() >= cfg.per_user_limit {
            return Err(RateLimitError::PerUserExceeded {
                limit: cfg.per_user_limit,
                window_secs: cfg.per_user_window.as_secs(),
            });
        }

        // Record.
        user_deque.push_back(now);
        inner.global_requests.push_back(now);

        Ok(())
    }

    /// Check if the user's token budget allows another request.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError::TokenBudgetExceeded`] when spent.
    pub fn check_token_budget(&self, user_id: Uuid) -> Result<(), RateLimitError> {
        self.check_token_budget_at(user_id, Instant::now())
    }

    fn check_token_budget_at(&self, user_id: Uuid, now: Instant) -> Result<(), RateLimitError> {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let cfg = self.config;

        let token_deque = inner.user_tokens.entry(user_id).or_default();
        prune_token_window(token_deque, now, cfg.token_window);
        let used: u64 = token_deque.iter().map(|(_, t)| t).sum();
        if used >= cfg.token_budget {
            return Err(RateLimitError::TokenBudgetExceeded {
                budget: cfg.token_budget,
                window_secs: cfg.token_window.as_secs(),
            });
        }
        Ok(())
    }

    /// Record token usage after an LLM response.
    pub fn record_tokens(&self, user_id: Uuid, tokens: u64) {
        self.record_tokens_at(user_id, tokens, Instant::now());
    }

    fn record_tokens_at(&self, user_id: Uuid, tokens: u64, now: Instant) {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let cfg = self.config;
        let token_deque = inner.user_tokens.entry(user_id).or_default();
        prune_token_window(token_deque, now, cfg.token_window);
        token_deque.push_back((now, tokens));
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn prune_window(deque: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&front) = deque.front() {
        if now.duration_since(front) > window {
            deque.pop_front();
        } else {
            break;
        }
    }
}

fn prune_token_window(deque: &mut VecDeque<(Instant, u64)>, now: Instant, window: Duration) {
    while let Some(&(front, _)) = deque.front() {
        if now.duration_since(front) > window {
            deque.pop_front();
        } else {
            break;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod tests;
