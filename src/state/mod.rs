//! State module for the data a crawl accumulates
//!
//! # Components
//!
//! - `SiteBody`: extracted content of one successfully fetched page
//! - `ReverseLinkGraph`: which pages referenced a given URL, in settle order
//! - `CompletionLatch`: single-shot flag shared by the two ways a crawl can end

mod latch;
mod link_graph;
mod site_body;

// Re-export main types
pub use latch::CompletionLatch;
pub use link_graph::ReverseLinkGraph;
pub use site_body::{HeadingLevel, SiteBody};
