//! Statistics for a finished crawl
//!
//! This module summarizes the scheduler's counters at the moment a crawl
//! ends and displays them.

use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlStatistics {
    /// Configured site budget
    pub budget: usize,

    /// URLs dispatched (each exactly once)
    pub dispatched: usize,

    /// Fetches that settled, successfully or not
    pub completed: usize,

    /// Fetches that produced a page body
    pub succeeded: usize,

    /// Fetches that failed (timeout, network error, bad status, non-HTML)
    pub failed: usize,

    /// Fetches still outstanding when the snapshot was taken
    pub in_flight: usize,

    /// Queued URLs never dispatched
    pub abandoned_queue: usize,

    /// Distinct URLs with at least one referrer
    pub referenced_urls: usize,

    /// Total references, counting repeats
    pub total_references: usize,

    /// Time from crawl start to snapshot
    pub elapsed: Duration,
}

impl CrawlStatistics {
    /// Returns the success rate of settled fetches as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.completed == 0 {
            return 0.0;
        }
        (self.succeeded as f64 / self.completed as f64) * 100.0
    }

    /// Returns settled fetches per second
    pub fn rate_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.completed as f64 / secs
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Budget: {}", stats.budget);
    println!("  Dispatched: {}", stats.dispatched);
    println!("  Settled: {}", stats.completed);
    println!("  Still in flight: {}", stats.in_flight);
    println!("  Abandoned in queue: {}", stats.abandoned_queue);
    println!();

    println!("References:");
    println!("  Referenced URLs: {}", stats.referenced_urls);
    println!("  Total references: {}", stats.total_references);
    println!();

    println!(
        "Elapsed: {:.1}s ({:.2} per second)",
        stats.elapsed.as_secs_f64(),
        stats.rate_per_sec()
    );

    println!(
        "Success Rate: {:.1}% ({} / {} fetches produced a page, {} failed)",
        stats.success_rate(),
        stats.succeeded,
        stats.completed,
        stats.failed
    );
}
