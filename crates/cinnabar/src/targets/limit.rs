use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

use super::PromptChatTarget;
use crate::errors::TargetError;
use crate::request::{PromptRequest, PromptResponse};

// ---------------------------------------------------------------------------
// RateLimited — per-minute throttle
// ---------------------------------------------------------------------------

/// Behavior-preserving per-minute throttle around any [`PromptChatTarget`].
///
/// Spaces calls at least `60s / max_requests_per_minute` apart by sleeping
/// before delegating; it never rejects. Waiting callers queue on an internal
/// lock, so throttled calls go through one at a time.
pub struct RateLimited<T> {
    inner: T,
    interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl<T> RateLimited<T> {
    /// Panics if `max_requests_per_minute` is zero.
    pub fn new(inner: T, max_requests_per_minute: u32) -> Self {
        assert!(
            max_requests_per_minute > 0,
            "max_requests_per_minute must be non-zero"
        );
        Self {
            inner,
            interval: Duration::from_secs_f64(60.0 / f64::from(max_requests_per_minute)),
            last_call: Mutex::new(None),
        }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[async_trait]
impl<T: PromptChatTarget> PromptChatTarget for RateLimited<T> {
    async fn send_prompt(&self, request: &PromptRequest) -> Result<PromptResponse, TargetError> {
        {
            let mut last_call = self.last_call.lock().await;
            if let Some(previous) = *last_call {
                let ready_at = previous + self.interval;
                let now = Instant::now();
                if ready_at > now {
                    debug!(wait = ?(ready_at - now), "throttling prompt send");
                    sleep(ready_at - now).await;
                }
            }
            *last_call = Some(Instant::now());
        }
        self.inner.send_prompt(request).await
    }
}

// ---------------------------------------------------------------------------
// Retry — retry-on-transient-failure
// ---------------------------------------------------------------------------

/// Retries a wrapped target on failures it marks retryable.
///
/// Backs off exponentially from `base_delay`, honoring a provider-supplied
/// `retry_after` when it is longer. Non-retryable failures and the final
/// exhausted failure propagate unchanged — nothing is swallowed or rewrapped.
pub struct Retry<T> {
    inner: T,
    max_attempts: u32,
    base_delay: Duration,
}

impl<T> Retry<T> {
    /// Panics if `max_attempts` is zero.
    pub fn new(inner: T, max_attempts: u32) -> Self {
        assert!(max_attempts > 0, "max_attempts must be non-zero");
        Self {
            inner,
            max_attempts,
            base_delay: Duration::from_millis(500),
        }
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[async_trait]
impl<T: PromptChatTarget> PromptChatTarget for Retry<T> {
    async fn send_prompt(&self, request: &PromptRequest) -> Result<PromptResponse, TargetError> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.inner.send_prompt(request).await {
                Ok(response) => return Ok(response),
                Err(error) if error.is_retryable() && attempt < self.max_attempts => {
                    let backoff = self.base_delay * 2u32.saturating_pow(attempt - 1);
                    let delay = match &error {
                        TargetError::RateLimit {
                            retry_after: Some(retry_after),
                        } => backoff.max(*retry_after),
                        _ => backoff,
                    };
                    warn!(attempt, %error, ?delay, "retryable target failure, backing off");
                    sleep(delay).await;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
