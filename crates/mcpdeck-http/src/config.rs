//! Client settings: where the dashboard lives, how to authenticate, and how
//! hard to retry reads.

use std::time::Duration;

use crate::http::HttpMethod;

/// Upper bound for a single backoff sleep.
const MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Retry budget for idempotent reads.
///
/// Mutations are never retried: a toggle or delete that reached the backend
/// but lost its response must not be replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u8,
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2, Duration::from_millis(300))
    }
}

impl RetryPolicy {
    pub const fn new(max_retries: u8, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Single attempt, no backoff.
    pub const fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    pub(crate) const fn retries_for(&self, method: HttpMethod) -> u8 {
        if method.is_idempotent_read() {
            self.max_retries
        } else {
            0
        }
    }

    /// Sleep before retry number `attempt` (1-based): doubles each time,
    /// capped at ten seconds.
    pub(crate) fn delay_before(&self, attempt: u8) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        2u32.checked_pow(u32::from(attempt) - 1)
            .and_then(|factor| self.base_delay.checked_mul(factor))
            .map_or(MAX_BACKOFF, |delay| delay.min(MAX_BACKOFF))
    }
}

/// Settings for `DashboardClient`.
#[derive(Debug, Clone)]
pub struct DashboardClientConfig {
    /// `/api/...` paths are appended to this.
    pub(crate) base_url: String,
    pub(crate) user_agent: String,
    /// Transport limit only. Health-probe timeouts arrive as HTTP 408.
    pub(crate) timeout: Duration,
    /// Raw `Cookie` header value.
    pub(crate) session: Option<String>,
    pub(crate) retry: RetryPolicy,
}

impl Default for DashboardClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            user_agent: concat!("mcpdeck/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            session: None,
            retry: RetryPolicy::default(),
        }
    }
}

impl DashboardClientConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Session cookie sent with every request. Blank values count as none,
    /// so an empty `MCPDECK_SESSION` does not produce an empty header.
    #[must_use]
    pub fn with_session(mut self, cookie: Option<String>) -> Self {
        self.session = cookie.filter(|c| !c.trim().is_empty());
        self
    }

    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
