//! Forum collector dialect

use serde::{Deserialize, Serialize};

use super::{CollectorQuerySpec, Dialect, Emitter};
use crate::config::ForumConfig;
use crate::query::TermBuckets;

/// Query document consumed by the forum collector.
///
/// Empty term lists are left out of the document entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumQuery {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub and_terms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub or_terms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub not_terms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exact_phrases: Vec<String>,
    pub subreddits: Vec<String>,
    pub search_all_reddit: bool,
    pub time_filter: String,
    pub sort_by: String,
}

pub struct ForumEmitter {
    config: ForumConfig,
}

impl ForumEmitter {
    pub fn new(config: ForumConfig) -> Self {
        Self { config }
    }
}

impl Emitter for ForumEmitter {
    fn dialect(&self) -> Dialect {
        Dialect::Forum
    }

    fn emit(&self, buckets: &TermBuckets) -> CollectorQuerySpec {
        CollectorQuerySpec::Forum(ForumQuery {
            and_terms: buckets.and_terms.clone(),
            or_terms: buckets.or_terms.clone(),
            not_terms: buckets.not_terms.clone(),
            exact_phrases: buckets.exact_phrases.clone(),
            subreddits: self.config.subreddits.clone(),
            search_all_reddit: self.config.search_all,
            time_filter: self.config.time_filter.clone(),
            sort_by: self.config.sort_by.clone(),
        })
    }
}
