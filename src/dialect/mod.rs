//! Collector query dialects.
//!
//! Every downstream collector expects its own query document shape. Each
//! dialect is an [`Emitter`]: a pure mapping from [`TermBuckets`] plus the
//! collector's fixed defaults to a [`CollectorQuerySpec`]. Field names are a
//! contract with the collector processes and must not change.

mod feed;
mod forum;

pub use feed::{FeedEmitter, FeedQuery};
pub use forum::{ForumEmitter, ForumQuery};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::query::TermBuckets;

/// A downstream collector's query document shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Forum collector: term lists plus a community allow-list
    Forum,
    /// Feed collector: advanced-search word fields plus a date window
    Feed,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::Forum, Dialect::Feed];

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Forum => "forum",
            Dialect::Feed => "feed",
        }
    }

    /// Minimum result count the collector is asked to gather.
    pub fn minimum_results(&self, config: &Config) -> u64 {
        match self {
            Dialect::Forum => config.forum.minimum_posts,
            Dialect::Feed => config.feed.minimum_results,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps normalized term buckets to one collector's query document.
pub trait Emitter {
    fn dialect(&self) -> Dialect;

    fn emit(&self, buckets: &TermBuckets) -> CollectorQuerySpec;
}

/// One structured query document per dialect.
///
/// Serializes as the bare dialect document, without a tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CollectorQuerySpec {
    Forum(ForumQuery),
    Feed(FeedQuery),
}

impl CollectorQuerySpec {
    pub fn dialect(&self) -> Dialect {
        match self {
            CollectorQuerySpec::Forum(_) => Dialect::Forum,
            CollectorQuerySpec::Feed(_) => Dialect::Feed,
        }
    }

    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            CollectorQuerySpec::Forum(q) => serde_json::to_value(q),
            CollectorQuerySpec::Feed(q) => serde_json::to_value(q),
        }
    }

    pub fn as_forum(&self) -> Option<&ForumQuery> {
        match self {
            CollectorQuerySpec::Forum(q) => Some(q),
            _ => None,
        }
    }

    pub fn as_feed(&self) -> Option<&FeedQuery> {
        match self {
            CollectorQuerySpec::Feed(q) => Some(q),
            _ => None,
        }
    }
}
