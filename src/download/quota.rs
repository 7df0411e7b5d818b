//! Page request quota with a fixed cooldown.

use std::time::Duration;

use tokio::time::sleep;

/// Page requests allowed per rate-limit window.
pub const API_REQUEST_LIMIT: u32 = 75;

/// Pause once the quota is used up.
pub const QUOTA_COOLDOWN: Duration = Duration::from_secs(16 * 60);

/// Counts page requests and enforces the cooldown.
#[derive(Debug)]
pub struct RequestQuota {
    limit: u32,
    cooldown: Duration,
    count: u32,
}

impl RequestQuota {
    pub fn new(limit: u32, cooldown: Duration) -> Self {
        Self {
            limit,
            cooldown,
            count: 0,
        }
    }

    /// Requests counted since the last reset.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Whether the next request has to wait for the cooldown.
    pub fn is_exhausted(&self) -> bool {
        self.count >= self.limit
    }

    /// Sleep for the cooldown and reset the counter.
    pub async fn cool_down(&mut self) {
        sleep(self.cooldown).await;
        self.count = 0;
    }

    /// Count one request.
    pub fn record(&mut self) {
        self.count += 1;
    }

    /// Wait if needed, then count one request. Returns whether it waited.
    pub async fn acquire(&mut self) -> bool {
        let waited = if self.is_exhausted() {
            self.cool_down().await;
            true
        } else {
            false
        };
        self.record();
        waited
    }
}

impl Default for RequestQuota {
    fn default() -> Self {
        Self::new(API_REQUEST_LIMIT, QUOTA_COOLDOWN)
    }
}
