use serde::Deserialize;
use std::time::Duration;

/// Seed URLs used when no configuration file provides any
pub const DEFAULT_SEEDS: &[&str] = &[
    "http://google.com",
    "http://apple.com",
    "http://wikipedia.org",
    "http://github.com",
    "http://youtube.com",
    "http://youtube.com",
    "http://twitter.com",
    "http://facebook.com",
];

/// Main configuration structure for refcrawl
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Starting URLs, dispatched in order
    pub seeds: Vec<String>,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seeds: DEFAULT_SEEDS.iter().map(|s| s.to_string()).collect(),
            crawler: CrawlerConfig::default(),
            user_agent: UserAgentConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of sites to dispatch over the whole crawl
    #[serde(rename = "max-sites")]
    pub max_sites: usize,

    /// Wall-clock limit for the whole crawl (seconds)
    #[serde(rename = "max-duration-secs")]
    pub max_duration_secs: u64,

    /// Timeout applied to each individual fetch (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Number of settled fetches between info-level progress reports
    #[serde(rename = "progress-interval")]
    pub progress_interval: usize,
}

impl CrawlerConfig {
    pub fn max_duration(&self) -> Duration {
        Duration::from_secs(self.max_duration_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_sites: 100_000,
            max_duration_secs: 40 * 60,
            request_timeout_secs: 25,
            progress_interval: 100,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value as `Name/Version`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "refcrawl".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the JSON snapshot written when the crawl ends
    #[serde(rename = "result-path")]
    pub result_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            result_path: "result-new.json".to_string(),
        }
    }
}
