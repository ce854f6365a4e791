//! Free-form boolean query parsing.
//!
//! A raw query such as `"red rust" AND (wheat OR barley) NOT drought` is
//! tokenized (phrases and groups are extracted behind placeholders) and then
//! normalized into four term buckets. Parsing never fails: malformed input
//! degrades to a best-effort classification.

pub mod normalizer;
pub mod tokenizer;
mod types;

pub use normalizer::{normalize, normalize_tokens, step};
pub use tokenizer::tokenize;
pub use types::{Group, TermBuckets, Token, Tokenized};

/// Tokenize and normalize a raw query in one call.
pub fn parse(raw: &str) -> TermBuckets {
    normalize(&tokenize(raw))
}
