use std::thread;
use std::time::Duration;

use log::{info, warn};
use rand::Rng;

use crate::error::ScrapeError;
use crate::model::{CaseQuery, CaseResult};
use crate::scraper::CourtScraper;

/// How callers retry a search whose CAPTCHA was rejected.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            min_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn with_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// No sleeping between attempts.
    pub fn immediate(mut self) -> Self {
        self.min_delay = Duration::ZERO;
        self.max_delay = Duration::ZERO;
        self
    }
}

pub fn random_retry_delay(policy: &RetryPolicy) {
    let min = policy.min_delay.as_millis() as u64;
    let max = (policy.max_delay.as_millis() as u64).max(min);
    if max == 0 {
        return;
    }
    let mut rng = rand::thread_rng();
    let delay_ms = rng.gen_range(min..=max);
    info!("Waiting for {:.1} seconds before retrying...", delay_ms as f64 / 1000.0);
    thread::sleep(Duration::from_millis(delay_ms));
}

/// Runs the whole workflow again, with a fresh session and CAPTCHA, when the
/// CAPTCHA is rejected. Every other error is returned straight away.
pub fn search_with_retries(
    scraper: &CourtScraper,
    query: &CaseQuery,
    policy: &RetryPolicy,
) -> Result<CaseResult, ScrapeError> {
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match scraper.search(query) {
            Err(e) if e.is_retryable() && attempt < attempts => {
                warn!("Attempt {}/{} for {} failed: {}", attempt, attempts, query.identifier(), e);
                random_retry_delay(policy);
                attempt += 1;
            }
            other => return other,
        }
    }
}
