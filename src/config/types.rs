//! Configuration type definitions and defaults

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::params::ParamsFormat;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub forum: ForumConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub decoder: DecoderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Check values that serde cannot validate on its own.
    pub fn validate(&self) -> Result<(), String> {
        if NaiveDate::parse_from_str(&self.feed.baseline_date, "%Y-%m-%d").is_err() {
            return Err(format!(
                "feed.baseline_date must be YYYY-MM-DD (got '{}')",
                self.feed.baseline_date
            ));
        }
        if self.decoder.poll_interval_secs == 0 {
            return Err("decoder.poll_interval_secs must be > 0".to_string());
        }
        if self.forum.subreddits.iter().any(|s| s.trim().is_empty()) {
            return Err("forum.subreddits must not contain empty names".to_string());
        }
        Ok(())
    }
}

/// Defaults for the forum collector dialect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumConfig {
    /// Communities searched in addition to the site-wide search
    #[serde(default = "default_subreddits")]
    pub subreddits: Vec<String>,
    /// Search the whole site, not just the allow-list
    #[serde(default = "default_search_all")]
    pub search_all: bool,
    #[serde(default = "default_time_filter")]
    pub time_filter: String,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    /// Written to the parameter file as `MINIMUM_POSTS`
    #[serde(default = "default_minimum_posts")]
    pub minimum_posts: u64,
}

pub fn default_subreddits() -> Vec<String> {
    [
        "AusFarming",
        "GrainGrowers",
        "RegenerativeAg",
        "AustralianAgriculture",
        "farming",
        "agriculture",
        "australianplants",
        "australiangardening",
        "WesternAustralia",
        "perth",
        "ausfarming",
        "permaculture",
        "AussieFarmers",
        "gardening",
        "OrganicFarming",
        "plantdisease",
        "PlantPathology",
        "cropfarming",
        "wheat",
        "sustainablefarming",
        "AgTech",
        "crops",
        "Agronomy",
        "soilscience",
        "Irrigation",
        "Pesticides",
        "botany",
        "farmers",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn default_search_all() -> bool {
    true
}

pub fn default_time_filter() -> String {
    "all".to_string()
}

pub fn default_sort_by() -> String {
    "relevance".to_string()
}

pub fn default_minimum_posts() -> u64 {
    10_000
}

impl Default for ForumConfig {
    fn default() -> Self {
        Self {
            subreddits: default_subreddits(),
            search_all: default_search_all(),
            time_filter: default_time_filter(),
            sort_by: default_sort_by(),
            minimum_posts: default_minimum_posts(),
        }
    }
}

/// Defaults for the feed collector dialect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_language")]
    pub language: String,
    /// Start of the search window when not searching all time (YYYY-MM-DD)
    #[serde(default = "default_baseline_date")]
    pub baseline_date: String,
    /// Omit the date window entirely
    #[serde(default)]
    pub search_all_time: bool,
    /// Written to the parameter file as `MINIMUM_TWEETS`
    #[serde(default = "default_minimum_results")]
    pub minimum_results: u64,
}

pub fn default_language() -> String {
    "en".to_string()
}

pub fn default_baseline_date() -> String {
    "2023-01-01".to_string()
}

pub fn default_minimum_results() -> u64 {
    9
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            baseline_date: default_baseline_date(),
            search_all_time: false,
            minimum_results: default_minimum_results(),
        }
    }
}

/// Result file polling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoderConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Row count at which a running collection is reported as completed
    #[serde(default = "default_completion_threshold")]
    pub completion_threshold: usize,
}

pub fn default_poll_interval() -> u64 {
    3
}

pub fn default_completion_threshold() -> usize {
    5
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            completion_threshold: default_completion_threshold(),
        }
    }
}

/// Parameter file output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_directory")]
    pub directory: String,
    #[serde(default)]
    pub format: ParamsFormat,
}

pub fn default_output_directory() -> String {
    "~/.local/share/harvest/params".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            format: ParamsFormat::default(),
        }
    }
}
