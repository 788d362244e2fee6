//! Wall-clock limit for a crawl

use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Longest deadline the governor arms
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Absolute deadline armed when the crawl starts
#[derive(Debug, Clone, Copy)]
pub struct DeadlineGovernor {
    started: Instant,
    deadline: Instant,
}

impl DeadlineGovernor {
    /// Arms a deadline `max_duration` from now
    ///
    /// Durations are capped at roughly thirty years so the deadline always
    /// fits in an `Instant`.
    pub fn new(max_duration: Duration) -> Self {
        let started = Instant::now();
        Self {
            started,
            deadline: started + max_duration.min(FAR_FUTURE),
        }
    }

    /// Resolves once the deadline has passed
    pub async fn expired(&self) {
        sleep_until(self.deadline).await
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Time left before the deadline, zero once it has passed
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }
}
