//! Term bucket normalizer.
//!
//! Walks the token stream left to right and sorts every token into one of
//! the four [`TermBuckets`]. The scan cursor is explicit: [`step`] consumes
//! one token (or an operator plus its operand) and returns the next cursor
//! position together with the updated buckets, so any token sub-sequence
//! can be normalized in isolation.

use tracing::debug;

use super::types::{Group, TermBuckets, Token, Tokenized};

/// Normalize a full tokenization pass into term buckets.
pub fn normalize(tokenized: &Tokenized) -> TermBuckets {
    normalize_tokens(&tokenized.tokens, tokenized)
}

/// Normalize an arbitrary token sequence, resolving placeholders against
/// the phrase and group tables in `tables`.
pub fn normalize_tokens(tokens: &[Token], tables: &Tokenized) -> TermBuckets {
    let mut buckets = TermBuckets::default();
    let mut index = 0;

    while index < tokens.len() {
        let (next, updated) = step(tokens, index, tables, buckets);
        index = next;
        buckets = updated;
    }

    // Only phrases that were actually extracted from this query survive
    buckets
        .exact_phrases
        .retain(|phrase| tables.phrases.contains(phrase));

    buckets
}

/// Classify the token at `index` and return the cursor position after it.
///
/// Returns `(tokens.len(), buckets)` unchanged when `index` is past the end.
pub fn step(
    tokens: &[Token],
    index: usize,
    tables: &Tokenized,
    mut buckets: TermBuckets,
) -> (usize, TermBuckets) {
    let Some(token) = tokens.get(index) else {
        return (tokens.len(), buckets);
    };

    match token {
        Token::Phrase(n) => {
            if let Some(phrase) = tables.phrases.get(*n) {
                buckets.exact_phrases.push(phrase.clone());
            }
            (index + 1, buckets)
        }
        Token::Group(n) => {
            if let Some(group) = tables.groups.get(*n) {
                expand_group(group, &mut buckets);
            }
            (index + 1, buckets)
        }
        Token::And(_) => (index + 1, buckets),
        Token::Or(_) => match tokens.get(index + 1) {
            Some(next) if next.is_placeholder() => {
                // Known gap: a placeholder operand of OR is skipped, not resolved
                debug!(operand = ?next, "dropping placeholder after OR");
                (index + 2, buckets)
            }
            Some(next) => {
                buckets.or_terms.push(next.verbatim());
                (index + 2, buckets)
            }
            None => {
                debug!("dropping trailing OR");
                (index + 1, buckets)
            }
        },
        Token::Not(_) => match tokens.get(index + 1) {
            Some(next) => {
                // Known gap: a placeholder operand of NOT keeps its name
                if next.is_placeholder() {
                    debug!(operand = ?next, "unresolved placeholder after NOT");
                }
                buckets.not_terms.push(next.verbatim());
                (index + 2, buckets)
            }
            None => {
                debug!("dropping trailing NOT");
                (index + 1, buckets)
            }
        },
        Token::Word(word) => {
            buckets.and_terms.push(word.clone());
            (index + 1, buckets)
        }
    }
}

/// Flatten a group one level: an `OR` anywhere inside makes every other
/// item an `or_term`, otherwise every non-`AND` item is an `and_term`.
/// Keyword matching inside a group is case-sensitive, and phrase items are
/// kept as their placeholder names.
fn expand_group(group: &Group, buckets: &mut TermBuckets) {
    let is_or = group
        .items
        .iter()
        .any(|item| matches!(item, Token::Word(w) if w == "OR"));
    let skip = if is_or { "OR" } else { "AND" };

    for item in &group.items {
        let term = match item {
            Token::Word(w) if w == skip => continue,
            Token::Word(_) | Token::Phrase(_) => item.verbatim(),
            _ => continue,
        };
        if is_or {
            buckets.or_terms.push(term);
        } else {
            buckets.and_terms.push(term);
        }
    }
}
