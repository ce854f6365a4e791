//! Unit tests for query parsing through the public API

use harvest::query::{parse, tokenize, Token};
use harvest::{compile, CompileOptions, Config, Dialect};

#[test]
fn plain_words_land_in_and_terms_in_order() {
    let buckets = parse("wheat barley canola oats");
    assert_eq!(buckets.and_terms, vec!["wheat", "barley", "canola", "oats"]);
    assert!(buckets.or_terms.is_empty());
    assert!(buckets.not_terms.is_empty());
    assert!(buckets.exact_phrases.is_empty());
}

#[test]
fn phrase_and_word() {
    let buckets = parse(r#""a b" AND c"#);
    assert_eq!(buckets.exact_phrases, vec!["a b"]);
    assert_eq!(buckets.and_terms, vec!["c"]);
}

#[test]
fn or_between_words() {
    let buckets = parse("x OR y");
    assert_eq!(buckets.and_terms, vec!["x"]);
    assert_eq!(buckets.or_terms, vec!["y"]);
}

#[test]
fn or_group() {
    let buckets = parse("(p OR q OR r)");
    assert_eq!(buckets.or_terms, vec!["p", "q", "r"]);
    assert!(buckets.and_terms.is_empty());
    assert!(buckets.not_terms.is_empty());
    assert!(buckets.exact_phrases.is_empty());
}

#[test]
fn and_group() {
    let buckets = parse("(p q)");
    assert_eq!(buckets.and_terms, vec!["p", "q"]);
    assert!(buckets.or_terms.is_empty());
}

#[test]
fn keywords_are_case_insensitive_at_top_level() {
    let buckets = parse("wheat not oats or rye and barley");
    assert_eq!(buckets.and_terms, vec!["wheat", "barley"]);
    assert_eq!(buckets.not_terms, vec!["oats"]);
    assert_eq!(buckets.or_terms, vec!["rye"]);
}

#[test]
fn not_keeps_placeholder_operands_verbatim() {
    // Neither the phrase nor the group after NOT is looked up
    let buckets = parse(r#"crop NOT "dry spell" NOT (a b)"#);
    assert_eq!(buckets.and_terms, vec!["crop"]);
    assert_eq!(buckets.not_terms, vec!["PHRASE_0", "GROUP_0"]);
    assert!(buckets.exact_phrases.is_empty());
    assert!(buckets.or_terms.is_empty());
}

#[test]
fn phrases_glued_to_words_are_split() {
    let tokenized = tokenize(r#"x"a b"y"#);
    assert_eq!(
        tokenized.tokens,
        vec![
            Token::Word("x".to_string()),
            Token::Phrase(0),
            Token::Word("y".to_string())
        ]
    );
    assert_eq!(tokenized.phrases, vec!["a b"]);
}

#[test]
fn malformed_input_never_fails() {
    for raw in ["", "   ", "\"", "((", ")", "OR", "NOT", "AND AND", "(\"a)\"", "\"\""] {
        let compiled = compile(raw, &Config::default(), &CompileOptions::default());
        assert_eq!(compiled.specs.len(), 2, "query {:?}", raw);
    }
}

#[test]
fn compile_emits_requested_dialect_only() {
    let options = CompileOptions::default().dialects(&[Dialect::Forum]);
    let compiled = compile(r#""leaf rust" wheat"#, &Config::default(), &options);
    assert_eq!(compiled.specs.len(), 1);
    let forum = compiled.specs[0].as_forum().unwrap();
    assert_eq!(forum.exact_phrases, vec!["leaf rust"]);
    assert_eq!(forum.and_terms, vec!["wheat"]);
}
