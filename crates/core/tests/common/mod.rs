//! Shared test helpers for `mccmd_core` integration tests.

#![allow(unreachable_pub)]

use mccmd_core::{Position, Span, Token, TokenKind, TokenValue, TokenizeResult, Version, tokenize};

/// Punctuation the grammars consume without giving it a token of its own.
const STRUCTURAL: &[char] = &['=', ',', '[', ']', '{', '}', ':', '!', '@'];
use mccmd_diagnostics::{SyntaxError, WarningKind};

// ─── Tokenizing ──────────────────────────────────────────────────────────────

/// Tokenize `src` from line 1, column 0 with the latest grammar.
#[allow(dead_code)]
pub fn lex(src: &str) -> TokenizeResult {
    lex_at(src, Version::LATEST)
}

/// Tokenize `src` from line 1, column 0 with the grammar of `version`.
#[allow(dead_code)]
pub fn lex_at(src: &str, version: Version) -> TokenizeResult {
    tokenize(src, Position::new(1, 0), version)
}

/// Parse a version literal.
#[allow(dead_code)]
pub fn v(text: &str) -> Version {
    text.parse()
        .unwrap_or_else(|e| panic!("bad version {text:?}: {e}"))
}

#[allow(dead_code)]
pub fn pos(line: usize, column: usize) -> Position {
    Position::new(line, column)
}

#[allow(dead_code)]
pub fn span(begin: (usize, usize), end: (usize, usize)) -> Span {
    Span::new(pos(begin.0, begin.1), pos(end.0, end.1))
}

// ─── Result helpers ──────────────────────────────────────────────────────────

/// Token kinds in order.
#[allow(dead_code)]
pub fn kinds(result: &TokenizeResult) -> Vec<TokenKind> {
    result.tokens.iter().map(|t| t.kind).collect()
}

/// Errors carried by error tokens, in order.
#[allow(dead_code)]
pub fn errors(result: &TokenizeResult) -> Vec<SyntaxError> {
    result.errors().map(|(_, e)| e.clone()).collect()
}

/// Warning kinds, in order.
#[allow(dead_code)]
pub fn warnings(result: &TokenizeResult) -> Vec<WarningKind> {
    result.warnings.iter().map(|w| w.kind.clone()).collect()
}

/// Tokens of one kind.
#[allow(dead_code)]
pub fn of_kind(result: &TokenizeResult, kind: TokenKind) -> Vec<&Token> {
    result.tokens.iter().filter(|t| t.kind == kind).collect()
}

/// Canonical names of every command token, nested ones included.
#[allow(dead_code)]
pub fn commands(result: &TokenizeResult) -> Vec<String> {
    result
        .tokens
        .iter()
        .filter_map(|t| match &t.value {
            TokenValue::Command(name) => Some(name.clone()),
            _ => None,
        })
        .collect()
}

/// Assert that tokenizing `src` produces no error tokens.
#[allow(dead_code)]
pub fn assert_clean(src: &str) {
    assert_clean_at(src, Version::LATEST);
}

#[allow(dead_code)]
pub fn assert_clean_at(src: &str, version: Version) {
    let result = lex_at(src, version);
    assert!(
        !result.has_errors(),
        "{src:?} at {version} produced errors: {:?}",
        errors(&result)
    );
}

/// The text a single-line token covers in `src`.
#[allow(dead_code)]
pub fn text_of<'a>(src: &'a str, token: &Token) -> &'a str {
    assert_eq!(token.span.begin.line, token.span.end.line, "multi-line token");
    let line = src
        .lines()
        .nth(token.span.begin.line - 1)
        .unwrap_or_else(|| panic!("no line {} in {src:?}", token.span.begin.line));
    let byte = |col: usize| {
        line.char_indices()
            .nth(col)
            .map_or(line.len(), |(i, _)| i)
    };
    &line[byte(token.span.begin.column)..byte(token.span.end.column)]
}

// ─── Invariants ──────────────────────────────────────────────────────────────

/// Structural invariants every result must satisfy, whatever the input.
#[allow(dead_code)]
pub fn assert_invariants(src: &str, result: &TokenizeResult) {
    let lines = src.split('\n').count();
    for token in &result.tokens {
        let s = token.span;
        assert!(s.begin <= s.end, "{src:?}: inverted span {s}");
        assert_eq!(
            s.begin.line, s.end.line,
            "{src:?}: token {s} crosses a line break"
        );
        assert!(s.end.line <= lines, "{src:?}: token {s} past the last line");
        assert_eq!(
            token.is_error(),
            token.error().is_some(),
            "{src:?}: error kind and error value disagree at {s}"
        );
    }
    for pair in result.tokens.windows(2) {
        assert!(
            pair[0].span.end <= pair[1].span.begin,
            "{src:?}: tokens out of order: {} then {}",
            pair[0].span,
            pair[1].span
        );
    }
    for (i, line) in src.split('\n').enumerate() {
        let n = i + 1;
        for (column, c) in line.chars().enumerate() {
            if c == ' ' || STRUCTURAL.contains(&c) {
                continue;
            }
            let covered = result.tokens.iter().any(|t| {
                t.span.begin.line == n
                    && t.span.begin.column <= column
                    && column < t.span.end.column
            });
            assert!(covered, "{src:?}: {c:?} at {n}.{column} is in no token");
        }
    }
}

/// Re-tokenizing a line from any command keyword onward, at the keyword's
/// position, must give back the same tokens. Covers nested commands too.
#[allow(dead_code)]
pub fn assert_commands_reparse(src: &str, result: &TokenizeResult, version: Version) {
    let lines: Vec<&str> = src.split('\n').collect();
    for (i, token) in result.tokens.iter().enumerate() {
        if token.kind != TokenKind::Command {
            continue;
        }
        let begin = token.span.begin;
        let rest: String = lines[begin.line - 1].chars().skip(begin.column).collect();
        let expected: Vec<Token> = result.tokens[i..]
            .iter()
            .take_while(|t| t.span.begin.line == begin.line)
            .cloned()
            .collect();
        let again = tokenize(&rest, begin, version);
        assert_eq!(
            again.tokens, expected,
            "{src:?}: re-tokenizing {rest:?} from {begin} differs"
        );
    }
}
