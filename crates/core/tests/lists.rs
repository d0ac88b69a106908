//! Tests for bracketed lists: selector option lists, score maps, block
//! states, and their recovery behavior.

mod common;

use common::{assert_clean, errors, lex, of_kind};
use mccmd_core::TokenKind;
use mccmd_diagnostics::SyntaxError;

// ─── 1. Shape ────────────────────────────────────────────────────────────────

#[test]
fn spaces_around_elements() {
    assert_clean("testfor @a[ tag=a , tag=b ]");
    assert_clean("testfor @a[scores={ a=1 , b=2 }]");
}

#[test]
fn empty_list_rules() {
    assert_eq!(
        errors(&lex("testfor @a[]")),
        vec![SyntaxError::AtLeastOneElement]
    );
    // Block states may be empty.
    assert_clean("setblock ~ ~ ~ stone []");
}

#[test]
fn trailing_comma() {
    let result = lex("testfor @a[tag=a,]");
    assert_eq!(errors(&result), vec![SyntaxError::TrailingComma]);
    assert_eq!(of_kind(&result, TokenKind::Tag).len(), 1);
}

#[test]
fn unclosed_list() {
    assert_eq!(
        errors(&lex("testfor @a[tag=a")),
        vec![SyntaxError::UnclosedBracket { close: ']' }]
    );
    assert_eq!(
        errors(&lex("testfor @a[scores={a=1")),
        vec![SyntaxError::UnclosedBracket { close: '}' }]
    );
}

// ─── 2. Recovery ─────────────────────────────────────────────────────────────

#[test]
fn bad_value_continues_with_next_element() {
    let result = lex("testfor @a[r=-1,tag=x]");
    assert_eq!(
        errors(&result),
        vec![SyntaxError::NumberOutOfRange {
            min: 0.0,
            max: None
        }]
    );
    assert_eq!(of_kind(&result, TokenKind::Tag).len(), 1);
}

#[test]
fn junk_between_elements_is_one_error() {
    let result = lex("testfor @a[tag=a b,tag=c]");
    assert_eq!(
        errors(&result),
        vec![SyntaxError::ExpListSeparator { close: ']' }]
    );
    assert_eq!(of_kind(&result, TokenKind::Tag).len(), 2);
}

#[test]
fn malformed_element_resyncs_at_comma() {
    let result = lex("testfor @a[c=x,tag=y]");
    assert_eq!(
        errors(&result),
        vec![
            SyntaxError::ExpInteger,
            SyntaxError::ExpListSeparator { close: ']' }
        ]
    );
    assert_eq!(of_kind(&result, TokenKind::Tag).len(), 1);
}

#[test]
fn unknown_option_abandons_the_line() {
    let result = lex("testfor @a[foo=1,tag=x]");
    assert_eq!(
        errors(&result),
        vec![SyntaxError::InvalidSelectorArg { arg: "foo".into() }]
    );
    assert!(of_kind(&result, TokenKind::Tag).is_empty());
    let last = result.tokens.last().map(|t| t.span.end.column);
    assert_eq!(last, Some(23));
}

// ─── 3. Block states ─────────────────────────────────────────────────────────

#[test]
fn block_state_values() {
    let src = r#"setblock ~ ~ ~ wool ["color": "red", "age": 3, "open": true]"#;
    let result = lex(src);
    assert!(!result.has_errors(), "{:?}", errors(&result));
    assert_eq!(of_kind(&result, TokenKind::Option).len(), 3);
    assert_eq!(of_kind(&result, TokenKind::Boolean).len(), 1);
}

#[test]
fn block_state_bad_value() {
    assert_eq!(
        errors(&lex(r#"setblock ~ ~ ~ wool ["open": maybe]"#)),
        vec![SyntaxError::ExpBsValue]
    );
    assert_eq!(
        errors(&lex(r#"setblock ~ ~ ~ wool ["open" true]"#)),
        vec![SyntaxError::ExpChar { expected: ':' }, SyntaxError::ExpListSeparator { close: ']' }]
    );
}
