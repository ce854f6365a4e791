//! Feed collector dialect
//!
//! Unlike the forum dialect, exact phrases are joined into one
//! `this_exact_phrase` string, and a date window is attached unless the
//! search covers all time.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{CollectorQuerySpec, Dialect, Emitter};
use crate::config::FeedConfig;
use crate::query::TermBuckets;

/// Query document consumed by the feed collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedQuery {
    pub all_of_these_words: Vec<String>,
    pub this_exact_phrase: String,
    pub any_of_these_words: Vec<String>,
    pub none_of_these_words: Vec<String>,
    pub these_hashtags: Vec<String>,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
}

pub struct FeedEmitter {
    config: FeedConfig,
    all_time: bool,
    today: NaiveDate,
}

impl FeedEmitter {
    /// Create an emitter using today's UTC date as the end of the window.
    pub fn new(config: FeedConfig) -> Self {
        Self {
            all_time: config.search_all_time,
            config,
            today: Utc::now().date_naive(),
        }
    }

    /// Override whether the date window is omitted.
    pub fn all_time(mut self, all_time: bool) -> Self {
        self.all_time = all_time;
        self
    }

    /// Pin the end of the date window.
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}

impl Emitter for FeedEmitter {
    fn dialect(&self) -> Dialect {
        Dialect::Feed
    }

    fn emit(&self, buckets: &TermBuckets) -> CollectorQuerySpec {
        let (from_date, to_date) = if self.all_time {
            (None, None)
        } else {
            (
                Some(self.config.baseline_date.clone()),
                Some(self.today.format("%Y-%m-%d").to_string()),
            )
        };

        CollectorQuerySpec::Feed(FeedQuery {
            all_of_these_words: buckets.and_terms.clone(),
            this_exact_phrase: buckets.exact_phrases.join(" "),
            any_of_these_words: buckets.or_terms.clone(),
            none_of_these_words: buckets.not_terms.clone(),
            these_hashtags: Vec::new(),
            language: self.config.language.clone(),
            from_date,
            to_date,
        })
    }
}
