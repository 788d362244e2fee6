//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates:
//! - Dispatching every dispatchable URL as its own fetch task
//! - Integrating settled fetches back into the scheduler
//! - Racing natural completion against the deadline
//! - Emitting exactly one snapshot through the completion latch
//!
//! All scheduler state lives in the coordinator's task. Fetch tasks only see
//! the fetcher and their own URL, and hand their result back by value, so the
//! bookkeeping needs no locks.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::deadline::DeadlineGovernor;
use crate::crawler::extractor::{extract_page, ExtractedPage};
use crate::crawler::fetcher::{FetchError, Fetcher, HttpFetcher};
use crate::crawler::scheduler::{Progress, Scheduler};
use crate::output::{CrawlStatistics, Snapshot};
use crate::state::CompletionLatch;
use crate::url::validate_absolute;
use crate::CrawlError;
use std::sync::Arc;
use tokio::task::JoinSet;

type FetchTaskOutput = (String, Result<ExtractedPage, FetchError>);

/// Snapshot plus counters, produced by whichever termination path wins
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub snapshot: Snapshot,
    pub statistics: CrawlStatistics,
}

/// How a crawl ended
#[derive(Debug, Clone)]
pub enum CrawlOutcome {
    /// Budget spent (or frontier exhausted) with nothing left in flight
    Completed(CrawlReport),

    /// The deadline fired first; in-flight fetches were abandoned
    CutShort(CrawlReport),

    /// Another holder of the completion latch fired it first
    Preempted,
}

impl CrawlOutcome {
    pub fn report(&self) -> Option<&CrawlReport> {
        match self {
            Self::Completed(report) | Self::CutShort(report) => Some(report),
            Self::Preempted => None,
        }
    }

    pub fn is_cut_short(&self) -> bool {
        matches!(self, Self::CutShort(_))
    }
}

/// Main crawler coordinator structure
pub struct Coordinator<F: Fetcher> {
    config: CrawlerConfig,
    scheduler: Scheduler,
    fetcher: Arc<F>,
    latch: CompletionLatch,
}

impl<F: Fetcher> Coordinator<F> {
    /// Creates a new coordinator instance
    ///
    /// Seeds are parsed into canonical form so that later links to the same
    /// page deduplicate against them.
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CrawlError)` - A seed URL is not a crawlable absolute URL
    pub fn new(config: &Config, fetcher: F) -> Result<Self, CrawlError> {
        let seeds = config
            .seeds
            .iter()
            .map(|seed| validate_absolute(seed).map(String::from))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Seeding queue with {} URLs", seeds.len());

        Ok(Self {
            config: config.crawler.clone(),
            scheduler: Scheduler::new(seeds, config.crawler.max_sites),
            fetcher: Arc::new(fetcher),
            latch: CompletionLatch::new(),
        })
    }

    /// Replaces the completion latch with one shared with the caller
    pub fn with_latch(mut self, latch: CompletionLatch) -> Self {
        self.latch = latch;
        self
    }

    /// Returns a handle to the completion latch
    pub fn latch(&self) -> CompletionLatch {
        self.latch.clone()
    }

    /// Runs the crawl until the budget is spent or the deadline fires
    ///
    /// Each iteration:
    /// 1. Dispatches every URL the scheduler will release
    /// 2. Checks the natural termination condition
    /// 3. Waits for either the next settled fetch or the deadline
    ///
    /// Fetch failures never surface here; the outcome always carries a
    /// best-effort snapshot unless the latch was claimed elsewhere.
    pub async fn run(self) -> CrawlOutcome {
        let Self {
            config,
            mut scheduler,
            fetcher,
            latch,
        } = self;

        let governor = DeadlineGovernor::new(config.max_duration());
        let timeout = config.request_timeout();
        let mut in_flight: JoinSet<FetchTaskOutput> = JoinSet::new();

        let expired = governor.expired();
        tokio::pin!(expired);

        tracing::info!(
            "Starting crawl: budget {}, deadline {:?}, request timeout {:?}",
            scheduler.remaining_sites(),
            config.max_duration(),
            timeout
        );

        loop {
            if latch.is_fired() {
                tracing::info!("Completion claimed elsewhere, stopping crawl");
                in_flight.detach_all();
                return CrawlOutcome::Preempted;
            }

            while let Some(url) = scheduler.next_dispatch() {
                tracing::trace!("Dispatching {}", url);
                let fetcher = Arc::clone(&fetcher);
                in_flight.spawn(async move {
                    let outcome = fetcher
                        .fetch(&url, timeout)
                        .await
                        .map(|body| extract_page(&body));
                    (url, outcome)
                });
            }

            if scheduler.is_finished() {
                if !latch.try_fire() {
                    return CrawlOutcome::Preempted;
                }
                let report = build_report(scheduler, &governor);
                tracing::info!(
                    "Crawl completed: {} sites settled in {:?}",
                    report.statistics.completed,
                    report.statistics.elapsed
                );
                return CrawlOutcome::Completed(report);
            }

            tokio::select! {
                biased;

                _ = &mut expired => {
                    if !latch.try_fire() {
                        in_flight.detach_all();
                        return CrawlOutcome::Preempted;
                    }
                    let report = build_report(scheduler, &governor);
                    tracing::warn!(
                        "Deadline reached, abandoning {} in-flight fetches",
                        in_flight.len()
                    );
                    in_flight.detach_all();
                    return CrawlOutcome::CutShort(report);
                }

                Some(joined) = in_flight.join_next() => {
                    match joined {
                        Ok((url, outcome)) => scheduler.settle(&url, outcome),
                        Err(e) => {
                            tracing::warn!("Fetch task failed: {}", e);
                            scheduler.record_lost_fetch();
                        }
                    }
                    report_progress(&scheduler, &governor, config.progress_interval);
                }
            }
        }
    }
}

fn build_report(scheduler: Scheduler, governor: &DeadlineGovernor) -> CrawlReport {
    let statistics = scheduler.statistics(governor.elapsed());
    CrawlReport {
        snapshot: scheduler.into_snapshot(),
        statistics,
    }
}

fn report_progress(scheduler: &Scheduler, governor: &DeadlineGovernor, interval: usize) {
    let progress = scheduler.progress(governor.elapsed(), governor.remaining());

    if scheduler.completed_requests() % interval.max(1) == 0 {
        tracing::info!("{}", format_progress(&progress));
    } else {
        tracing::debug!("{}", format_progress(&progress));
    }
}

fn format_progress(progress: &Progress) -> String {
    let predicted = progress
        .predicted_minutes
        .map(|m| format!("{:.2}", m))
        .unwrap_or_else(|| "unknown".to_string());

    format!(
        "{} remaining. {} in queue. {} running. {:.2} per second. {} more minutes predicted. {:.2} allowed.",
        progress.remaining_sites,
        progress.queued,
        progress.running,
        progress.rate_per_sec,
        predicted,
        progress.allowed_minutes
    )
}

/// Runs a crawl over HTTP with the given configuration
///
/// # Example
///
/// ```no_run
/// use refcrawl::config::Config;
/// use refcrawl::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = run_crawl(&Config::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlOutcome, CrawlError> {
    let fetcher = HttpFetcher::from_config(&config.user_agent)?;
    let coordinator = Coordinator::new(config, fetcher)?;
    Ok(coordinator.run().await)
}
