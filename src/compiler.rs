//! Query compilation: raw query to one document per collector dialect.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::dialect::{CollectorQuerySpec, Dialect, Emitter, FeedEmitter, ForumEmitter};
use crate::query::{self, TermBuckets};

/// Per-call overrides of the configured dialect defaults.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Dialects to emit; all of them when empty
    pub dialects: Vec<Dialect>,
    /// Override `feed.search_all_time`
    pub all_time: Option<bool>,
    /// Pin the end of the feed date window (defaults to today, UTC)
    pub today: Option<NaiveDate>,
}

impl CompileOptions {
    pub fn dialects(mut self, dialects: &[Dialect]) -> Self {
        self.dialects = dialects.to_vec();
        self
    }

    pub fn all_time(mut self, all_time: bool) -> Self {
        self.all_time = Some(all_time);
        self
    }

    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Requested dialects in request order, without repeats.
    fn selected(&self) -> Vec<Dialect> {
        if self.dialects.is_empty() {
            return Dialect::ALL.to_vec();
        }
        let mut selected = Vec::new();
        for dialect in &self.dialects {
            if !selected.contains(dialect) {
                selected.push(*dialect);
            }
        }
        selected
    }
}

/// The term buckets of a query plus every emitted collector document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledQuery {
    pub buckets: TermBuckets,
    pub specs: Vec<CollectorQuerySpec>,
}

impl CompiledQuery {
    pub fn spec(&self, dialect: Dialect) -> Option<&CollectorQuerySpec> {
        self.specs.iter().find(|s| s.dialect() == dialect)
    }
}

/// Build the emitters for the requested dialects.
pub fn emitters(config: &Config, options: &CompileOptions) -> Vec<Box<dyn Emitter>> {
    options
        .selected()
        .into_iter()
        .map(|dialect| -> Box<dyn Emitter> {
            match dialect {
                Dialect::Forum => Box::new(ForumEmitter::new(config.forum.clone())),
                Dialect::Feed => {
                    let mut emitter = FeedEmitter::new(config.feed.clone());
                    if let Some(all_time) = options.all_time {
                        emitter = emitter.all_time(all_time);
                    }
                    if let Some(today) = options.today {
                        emitter = emitter.today(today);
                    }
                    Box::new(emitter)
                }
            }
        })
        .collect()
}

/// Compile a raw query. Never fails; always yields at least one document.
pub fn compile(raw: &str, config: &Config, options: &CompileOptions) -> CompiledQuery {
    let buckets = query::parse(raw);
    debug!(
        and = buckets.and_terms.len(),
        or = buckets.or_terms.len(),
        not = buckets.not_terms.len(),
        phrases = buckets.exact_phrases.len(),
        "normalized query"
    );

    let specs = emitters(config, options)
        .iter()
        .map(|emitter| emitter.emit(&buckets))
        .collect();

    CompiledQuery { buckets, specs }
}
