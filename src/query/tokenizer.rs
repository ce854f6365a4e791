//! Query tokenizer.
//!
//! Runs in three passes over the raw query:
//!
//! 1. Quoted phrases (`"..."`) are pulled out into the phrase table.
//! 2. Single-level parenthetical groups (`( ... )` with no parentheses
//!    inside) are pulled out into the group table.
//! 3. What remains is split on whitespace into [`Token`]s.
//!
//! Extracted spans are replaced in the working text by marker words built
//! from private-use code points, padded with spaces so a marker is always a
//! token of its own. Markers are converted to `Token::Phrase` /
//! `Token::Group` in the final pass and never leak out of this module.
//!
//! Tokenization never fails. An unterminated quote leaves the rest of the
//! query as ordinary text; stray or nested parentheses stay in the token
//! stream literally.

use super::types::{Group, Token, Tokenized};

const PHRASE_OPEN: char = '\u{E000}';
const PHRASE_CLOSE: char = '\u{E001}';
const GROUP_OPEN: char = '\u{E002}';
const GROUP_CLOSE: char = '\u{E003}';

fn is_marker_char(c: char) -> bool {
    (PHRASE_OPEN..=GROUP_CLOSE).contains(&c)
}

fn marker(open: char, index: usize, close: char) -> String {
    format!(" {}{}{} ", open, index, close)
}

fn parse_marker(word: &str, open: char, close: char) -> Option<usize> {
    word.strip_prefix(open)?.strip_suffix(close)?.parse().ok()
}

/// Tokenize a raw query string.
pub fn tokenize(raw: &str) -> Tokenized {
    // Marker code points typed by the user would be indistinguishable from ours
    let sanitized: String = raw
        .chars()
        .map(|c| if is_marker_char(c) { ' ' } else { c })
        .collect();

    let mut phrases = Vec::new();
    let text = extract_phrases(&sanitized, &mut phrases);

    let mut groups = Vec::new();
    let text = extract_groups(&text, &phrases, &mut groups);

    let tokens = text.split_whitespace().map(classify).collect();

    Tokenized {
        tokens,
        phrases,
        groups,
    }
}

fn classify(word: &str) -> Token {
    if let Some(n) = parse_marker(word, PHRASE_OPEN, PHRASE_CLOSE) {
        Token::Phrase(n)
    } else if let Some(n) = parse_marker(word, GROUP_OPEN, GROUP_CLOSE) {
        Token::Group(n)
    } else {
        Token::from_word(word)
    }
}

/// Replace every `"..."` span with a phrase marker.
fn extract_phrases(input: &str, phrases: &mut Vec<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('"') {
        let after = &rest[start + 1..];
        let Some(len) = after.find('"') else {
            // Unterminated: leave the lone quote and the remainder as text
            break;
        };

        out.push_str(&rest[..start]);
        let phrase = &after[..len];
        if phrase.is_empty() {
            out.push(' ');
        } else {
            out.push_str(&marker(PHRASE_OPEN, phrases.len(), PHRASE_CLOSE));
            phrases.push(phrase.to_string());
        }
        rest = &after[len + 1..];
    }

    out.push_str(rest);
    out
}

/// Replace every innermost non-empty `( ... )` span with a group marker.
fn extract_groups(input: &str, phrases: &[String], groups: &mut Vec<Group>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find('(') {
        let after = &rest[open + 1..];
        match after.find(|c: char| c == '(' || c == ')') {
            Some(close) if close > 0 && after[close..].starts_with(')') => {
                out.push_str(&rest[..open]);
                out.push_str(&marker(GROUP_OPEN, groups.len(), GROUP_CLOSE));
                groups.push(build_group(&after[..close], phrases));
                rest = &after[close + 1..];
            }
            Some(_) => {
                // Nested or empty: this '(' stays literal, keep scanning after it
                out.push_str(&rest[..=open]);
                rest = after;
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}

fn build_group(inner: &str, phrases: &[String]) -> Group {
    let items: Vec<Token> = inner
        .split_whitespace()
        .map(|word| match parse_marker(word, PHRASE_OPEN, PHRASE_CLOSE) {
            Some(n) => Token::Phrase(n),
            None => Token::Word(word.to_string()),
        })
        .collect();

    let text = items
        .iter()
        .map(|item| match item {
            Token::Phrase(n) => {
                format!("\"{}\"", phrases.get(*n).map(String::as_str).unwrap_or(""))
            }
            Token::Word(w) => w.clone(),
            _ => String::new(),
        })
        .collect::<Vec<_>>()
        .join(" ");

    Group { text, items }
}
