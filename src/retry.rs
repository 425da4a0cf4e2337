use std::time::Duration;

/// Exponential backoff used while waiting for the network to come back.
#[derive(Debug, Clone)]
pub struct BackoffConfig {
    /// `None` keeps retrying forever.
    pub max_retries: Option<u32>,
    pub initial_delay_secs: u64,
    pub max_delay_secs: u64,
}

/// Waits start at 5 s and never exceed 300 s.
impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            max_retries: None,
            initial_delay_secs: 5,
            max_delay_secs: 300,
        }
    }
}

impl BackoffConfig {
    /// Compute the delay for a given retry attempt (0-indexed).
    ///
    /// Formula: `min(initial_delay * 2^retry, max_delay)`
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let exp_delay = self
            .initial_delay_secs
            .saturating_mul(1u64.checked_shl(retry).unwrap_or(u64::MAX));
        Duration::from_secs(exp_delay.min(self.max_delay_secs))
    }

    /// Whether another attempt is allowed after `retries` failed retries.
    pub fn allows_retry(&self, retries: u32) -> bool {
        self.max_retries.is_none_or(|max| retries < max)
    }
}
