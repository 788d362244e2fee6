//! Scheduler for the crawl frontier, budget and accumulated results
//!
//! This module handles:
//! - FIFO queue management for URLs to crawl (breadth-first intent)
//! - The visited set, so each URL is dispatched at most once
//! - Charging the site budget at dispatch time
//! - Integrating settled fetches into the site bodies and reverse link graph
//! - The natural termination condition and progress estimates
//!
//! The scheduler is a plain state machine with no I/O. The coordinator owns it
//! and is the only thing that mutates it, between awaits.

use crate::crawler::extractor::ExtractedPage;
use crate::crawler::fetcher::FetchError;
use crate::output::{CrawlStatistics, Snapshot};
use crate::state::{ReverseLinkGraph, SiteBody};
use crate::url::resolve_link;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::time::Duration;
use url::Url;

/// Advisory throughput estimate
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub remaining_sites: usize,
    pub queued: usize,
    pub running: usize,
    /// Settled fetches per second since the crawl started
    pub rate_per_sec: f64,
    /// Naive linear projection; None until the first fetch settles
    pub predicted_minutes: Option<f64>,
    /// Minutes left until the deadline
    pub allowed_minutes: f64,
}

/// Scheduler manages the frontier queue, budget and crawl results
pub struct Scheduler {
    /// Pending URLs; may hold duplicates, dedup happens at dispatch
    queue: VecDeque<String>,

    /// Every URL ever dispatched, successful or not
    visited: HashSet<String>,

    /// Target URL -> pages that linked to it
    references: ReverseLinkGraph,

    /// Successfully fetched URL -> extracted content
    bodies: BTreeMap<String, SiteBody>,

    initial_budget: usize,
    remaining_sites: usize,
    running_requests: usize,
    completed_requests: usize,
    succeeded_requests: usize,
    failed_requests: usize,
}

impl Scheduler {
    /// Creates a new scheduler
    ///
    /// # Arguments
    ///
    /// * `seeds` - Initial URLs, dispatched in order
    /// * `max_sites` - Total number of URLs the crawl may dispatch
    pub fn new<I, S>(seeds: I, max_sites: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: seeds.into_iter().map(Into::into).collect(),
            visited: HashSet::new(),
            references: ReverseLinkGraph::new(),
            bodies: BTreeMap::new(),
            initial_budget: max_sites,
            remaining_sites: max_sites,
            running_requests: 0,
            completed_requests: 0,
            succeeded_requests: 0,
            failed_requests: 0,
        }
    }

    /// Pops the next URL that should be fetched
    ///
    /// Already visited URLs are discarded without charging the budget. A
    /// returned URL has been charged against the budget, counted as running
    /// and marked visited, so re-enqueueing it while in flight cannot cause a
    /// second fetch.
    ///
    /// # Returns
    ///
    /// * `Some(String)` - A URL to dispatch now
    /// * `None` - The queue is drained or the budget is spent
    pub fn next_dispatch(&mut self) -> Option<String> {
        while self.remaining_sites > 0 {
            let url = self.queue.pop_front()?;

            if self.visited.contains(&url) {
                tracing::trace!("Skipping already visited URL: {}", url);
                continue;
            }

            self.remaining_sites -= 1;
            self.running_requests += 1;
            self.visited.insert(url.clone());

            return Some(url);
        }

        None
    }

    /// Integrates the outcome of a fetch for `url`
    ///
    /// On success the page body is recorded and every valid outbound link is
    /// added to the reverse link graph; links are enqueued only while budget
    /// remains. Failures leave no trace besides the counters.
    pub fn settle(&mut self, url: &str, outcome: Result<ExtractedPage, FetchError>) {
        match outcome {
            Ok(page) => {
                self.integrate_links(url, &page);
                self.bodies.insert(url.to_string(), page.body);
                self.succeeded_requests += 1;
            }
            Err(e) => {
                tracing::debug!("Fetch failed: {}", e);
                self.failed_requests += 1;
            }
        }

        self.finish_request();
    }

    /// Settles a fetch whose task died before reporting its URL
    pub fn record_lost_fetch(&mut self) {
        self.failed_requests += 1;
        self.finish_request();
    }

    fn finish_request(&mut self) {
        self.running_requests = self.running_requests.saturating_sub(1);
        self.completed_requests += 1;
    }

    fn integrate_links(&mut self, source: &str, page: &ExtractedPage) {
        let Ok(base_url) = Url::parse(source) else {
            tracing::warn!("Cannot resolve links against unparsable URL {}", source);
            return;
        };

        for raw in page.outbound_links() {
            let Some(resolved) = resolve_link(&base_url, raw) else {
                tracing::trace!("Discarding invalid link {:?} on {}", raw, source);
                continue;
            };

            let resolved = String::from(resolved);
            self.references.record(&resolved, source);

            if self.remaining_sites > 0 {
                self.queue.push_back(resolved);
            }
        }
    }

    /// Returns true once no further progress is possible
    ///
    /// Nothing may be in flight, and either the budget is spent or the queue
    /// holds nothing that could still be dispatched. Call this after draining
    /// `next_dispatch`, which discards already visited entries.
    pub fn is_finished(&self) -> bool {
        self.running_requests == 0
            && (self.remaining_sites == 0 || self.queue.iter().all(|u| self.visited.contains(u)))
    }

    /// Computes an advisory throughput estimate
    pub fn progress(&self, elapsed: Duration, until_deadline: Duration) -> Progress {
        let elapsed_secs = elapsed.as_secs_f64();
        let rate_per_sec = if elapsed_secs > 0.0 {
            self.completed_requests as f64 / elapsed_secs
        } else {
            0.0
        };

        let predicted_minutes = (rate_per_sec > 0.0).then(|| {
            (self.remaining_sites + self.running_requests) as f64 / rate_per_sec / 60.0
        });

        Progress {
            remaining_sites: self.remaining_sites,
            queued: self.queue.len(),
            running: self.running_requests,
            rate_per_sec,
            predicted_minutes,
            allowed_minutes: until_deadline.as_secs_f64() / 60.0,
        }
    }

    /// Summarizes counters for the final report
    pub fn statistics(&self, elapsed: Duration) -> CrawlStatistics {
        CrawlStatistics {
            budget: self.initial_budget,
            dispatched: self.visited.len(),
            completed: self.completed_requests,
            succeeded: self.succeeded_requests,
            failed: self.failed_requests,
            in_flight: self.running_requests,
            abandoned_queue: self.queue.len(),
            referenced_urls: self.references.len(),
            total_references: self.references.edge_count(),
            elapsed,
        }
    }

    /// Consumes the scheduler, yielding the bodies and reverse link graph
    pub fn into_snapshot(self) -> Snapshot {
        Snapshot {
            bodies: self.bodies,
            references: self.references,
        }
    }

    /// Number of URLs still allowed to be dispatched
    pub fn remaining_sites(&self) -> usize {
        self.remaining_sites
    }

    /// Number of fetches currently in flight
    pub fn running_requests(&self) -> usize {
        self.running_requests
    }

    /// Number of fetches that have settled, successfully or not
    pub fn completed_requests(&self) -> usize {
        self.completed_requests
    }

    /// Returns the number of URLs in the queue
    pub fn queue_size(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether `url` has been dispatched
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn bodies(&self) -> &BTreeMap<String, SiteBody> {
        &self.bodies
    }

    pub fn references(&self) -> &ReverseLinkGraph {
        &self.references
    }
}
