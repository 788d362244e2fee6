//! Configuration module for refcrawl
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every field has a built-in default, so running without a file crawls the
//! default seed set with the default budget and deadline.
//!
//! # Example
//!
//! ```no_run
//! use refcrawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl.toml")).unwrap();
//! println!("Crawler will fetch at most {} sites", config.crawler.max_sites);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_SEEDS};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
