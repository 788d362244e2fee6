//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with per-request timeouts
//! - HTML content and link extraction
//! - Queue, budget and visited-set scheduling
//! - Overall crawl coordination against a deadline

mod coordinator;
mod deadline;
mod extractor;
mod fetcher;
mod scheduler;

pub use coordinator::{run_crawl, Coordinator, CrawlOutcome, CrawlReport};
pub use deadline::DeadlineGovernor;
pub use extractor::{extract_page, ExtractedPage};
pub use fetcher::{build_http_client, fetch_url, FetchError, Fetcher, HttpFetcher};
pub use scheduler::{Progress, Scheduler};
