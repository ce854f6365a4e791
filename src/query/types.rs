//! Token and term bucket types shared by the tokenizer and normalizer

use serde::{Deserialize, Serialize};

/// A single element of the tokenized query stream.
///
/// Phrase and group placeholders index into the tables of the
/// [`Tokenized`] pass that produced them. They never appear in user text,
/// so a user typing `PHRASE_0` gets an ordinary word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal word, kept exactly as typed
    Word(String),
    /// `AND` keyword (any case)
    And(String),
    /// `OR` keyword (any case)
    Or(String),
    /// `NOT` keyword (any case)
    Not(String),
    /// Placeholder for the n-th extracted quoted phrase
    Phrase(usize),
    /// Placeholder for the n-th extracted parenthetical group
    Group(usize),
}

impl Token {
    /// Classify a whitespace-delimited word, recognizing operator keywords.
    pub fn from_word(word: &str) -> Self {
        match word.to_ascii_uppercase().as_str() {
            "AND" => Token::And(word.to_string()),
            "OR" => Token::Or(word.to_string()),
            "NOT" => Token::Not(word.to_string()),
            _ => Token::Word(word.to_string()),
        }
    }

    /// True for phrase and group placeholders.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Token::Phrase(_) | Token::Group(_))
    }

    /// Name of a placeholder (`PHRASE_n` / `GROUP_n`).
    pub fn placeholder_name(&self) -> Option<String> {
        match self {
            Token::Phrase(n) => Some(format!("PHRASE_{}", n)),
            Token::Group(n) => Some(format!("GROUP_{}", n)),
            _ => None,
        }
    }

    /// The token as it stands in the scanned stream: words and keywords as
    /// typed, placeholders by name, without looking them up.
    pub fn verbatim(&self) -> String {
        match self {
            Token::Word(s) | Token::And(s) | Token::Or(s) | Token::Not(s) => s.clone(),
            placeholder => placeholder.placeholder_name().unwrap_or_default(),
        }
    }
}

/// Output of one tokenization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenized {
    pub tokens: Vec<Token>,
    /// Extracted exact phrases, indexed by `Token::Phrase`
    pub phrases: Vec<String>,
    /// Extracted parenthetical groups, indexed by `Token::Group`
    pub groups: Vec<Group>,
}

/// One extracted `( ... )` group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    /// Inner text with any phrases shown back in quotes
    pub text: String,
    /// Whitespace-split inner items: `Token::Word` or `Token::Phrase`.
    /// Keywords inside a group are not classified.
    pub items: Vec<Token>,
}

/// The four classified term lists produced by normalization.
///
/// Insertion order is preserved and duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermBuckets {
    pub and_terms: Vec<String>,
    pub or_terms: Vec<String>,
    pub not_terms: Vec<String>,
    pub exact_phrases: Vec<String>,
}

impl TermBuckets {
    pub fn is_empty(&self) -> bool {
        self.and_terms.is_empty()
            && self.or_terms.is_empty()
            && self.not_terms.is_empty()
            && self.exact_phrases.is_empty()
    }

    /// Total number of terms across all buckets.
    pub fn len(&self) -> usize {
        self.and_terms.len()
            + self.or_terms.len()
            + self.not_terms.len()
            + self.exact_phrases.len()
    }
}
