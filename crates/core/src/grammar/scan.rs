//! Scanning machinery shared by the command and JSON tokenizers: the token
//! scope guard, character-level helpers, and the bracketed-list combinator.

use std::ops::{Deref, DerefMut};

use mccmd_diagnostics::{Position, Span, SyntaxError};

use super::cursor::{Cursor, is_terminating};
use super::token::{Token, TokenKind, TokenValue};

/// A grammar rule gave up on the current construct.
///
/// The error has already been recorded as a token; callers only decide how
/// far to unwind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Halt;

/// Result of a token-producing grammar rule.
pub(crate) type Parse<T = ()> = Result<T, Halt>;

/// Cursor plus the tokens produced so far.
#[derive(Debug)]
pub(crate) struct Scanner {
    cursor: Cursor,
    tokens: Vec<Token>,
}

impl Scanner {
    pub(crate) fn new(src: &str, start: Position) -> Self {
        Self {
            cursor: Cursor::new(src, start),
            tokens: Vec::new(),
        }
    }

    pub(crate) fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

/// Anything that owns a [`Scanner`].
///
/// Provides the character-level helpers every grammar builds on.
pub(crate) trait Scan: Sized {
    fn scanner(&self) -> &Scanner;
    fn scanner_mut(&mut self) -> &mut Scanner;

    fn current(&self) -> char {
        self.scanner().cursor.current()
    }

    fn peek(&self, k: usize) -> char {
        self.scanner().cursor.peek(k)
    }

    fn pos(&self) -> Position {
        self.scanner().cursor.pos()
    }

    fn advance(&mut self) {
        self.scanner_mut().cursor.advance();
    }

    fn skip_spaces(&mut self) {
        self.scanner_mut().cursor.skip_spaces();
    }

    fn at_eof(&self) -> bool {
        self.scanner().cursor.at_eof()
    }

    fn char_at(&self, k: usize) -> Option<char> {
        self.scanner().cursor.char_at(k)
    }

    /// True if the `k`-th character from the cursor ends an argument.
    fn terminates_at(&self, k: usize) -> bool {
        self.char_at(k).is_none_or(is_terminating)
    }

    fn line_not_end(&self) -> bool {
        self.scanner().cursor.line_not_end()
    }

    fn skip_line(&mut self) -> String {
        self.scanner_mut().cursor.skip_line()
    }

    /// True if the input at the cursor starts with `text`.
    fn looking_at(&self, text: &str) -> bool {
        text.chars().enumerate().all(|(i, c)| {
            let here = if i == 0 { self.current() } else { self.peek(i - 1) };
            here == c
        })
    }

    fn push_tokens(&mut self, tokens: impl IntoIterator<Item = Token>) {
        self.scanner_mut().tokens.extend(tokens);
    }

    /// Open a token of the given kind starting at the current position.
    fn token(&mut self, kind: TokenKind) -> TokenScope<'_, Self> {
        TokenScope::open(self, Some(kind))
    }

    /// Open a token whose kind is decided later.
    fn untyped_token(&mut self) -> TokenScope<'_, Self> {
        TokenScope::open(self, None)
    }

    /// Record a zero-width error token at the current position.
    fn error_here(&mut self, err: SyntaxError) {
        self.token(TokenKind::Error).reject(err);
    }

    /// Record an error token covering the rest of the line.
    fn error_to_line_end(&mut self, err: SyntaxError) {
        let mut tok = self.token(TokenKind::Error);
        tok.reject(err);
        tok.skip_line();
    }

    fn raw_char(&mut self, expected: char) -> Result<(), SyntaxError> {
        if self.current() != expected {
            return Err(SyntaxError::ExpChar { expected });
        }
        self.advance();
        Ok(())
    }

    /// A single character, then any spaces.
    fn char(&mut self, expected: char) -> Result<(), SyntaxError> {
        self.raw_char(expected)?;
        self.skip_spaces();
        Ok(())
    }

    /// Like [`Scan::char`], recording a zero-width error on mismatch.
    fn expect_char(&mut self, expected: char) -> Parse {
        match self.char(expected) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.error_here(e);
                Err(Halt)
            }
        }
    }

    /// A `"`-delimited string; `\"` is the only escape. Returns the content
    /// with escapes resolved.
    fn raw_quoted_string(&mut self) -> Result<String, SyntaxError> {
        self.raw_char('"')?;
        let mut text = String::new();
        while self.current() != '"' {
            if !self.line_not_end() {
                return Err(SyntaxError::UnclosedString);
            }
            if self.current() == '\\' && self.peek(0) == '"' {
                self.advance();
            }
            text.push(self.current());
            self.advance();
        }
        self.advance();
        Ok(text)
    }

    fn quoted_string(&mut self) -> Result<String, SyntaxError> {
        let text = self.raw_quoted_string()?;
        self.skip_spaces();
        Ok(text)
    }

    /// Consume list text up to the next top-level `,` or `close`, never past
    /// the end of the line. Quotes and nested brackets are skipped whole.
    fn skip_to_separator(&mut self, close: char) {
        let mut depth = 0usize;
        while self.line_not_end() {
            match self.current() {
                '"' => {
                    // An unclosed string runs to the end of the line.
                    let _ = self.raw_quoted_string();
                    continue;
                }
                '[' | '{' => depth += 1,
                ']' | '}' if depth > 0 => depth -= 1,
                ',' if depth == 0 => break,
                c if c == close && depth == 0 => break,
                _ => {}
            }
            self.advance();
        }
    }

    /// Read `open element (, element)* close`.
    ///
    /// `element` is called with the cursor on the first character of each
    /// element. An element that halts mid-line is resynchronized at the next
    /// top-level separator; one that halts at the end of the line ends the
    /// list. Trailing commas, unexpected separators, and a missing closer are
    /// recorded as error tokens.
    fn bracketed(
        &mut self,
        open: char,
        close: char,
        allow_empty: bool,
        mut element: impl FnMut(&mut Self) -> Parse,
    ) -> Parse {
        if self.current() != open {
            self.error_here(SyntaxError::ExpChar { expected: open });
            return Err(Halt);
        }
        self.advance();
        self.skip_spaces();
        if self.current() == close {
            if !allow_empty {
                self.error_here(SyntaxError::AtLeastOneElement);
            }
            self.advance();
            self.skip_spaces();
            return Ok(());
        }
        'elements: loop {
            self.skip_spaces();
            if element(&mut *self).is_err() && !self.line_not_end() {
                return Err(Halt);
            }
            loop {
                let c = self.current();
                if c == close {
                    self.advance();
                    self.skip_spaces();
                    return Ok(());
                }
                if c == ',' {
                    let mut k = 0;
                    while self.peek(k) == ' ' {
                        k += 1;
                    }
                    if self.peek(k) != close {
                        self.advance();
                        continue 'elements;
                    }
                    {
                        let mut tok = self.token(TokenKind::Error);
                        tok.reject(SyntaxError::TrailingComma);
                        tok.advance();
                    }
                    self.skip_spaces();
                    self.advance();
                    self.skip_spaces();
                    return Ok(());
                }
                if !self.line_not_end() {
                    self.error_here(SyntaxError::UnclosedBracket { close });
                    return Err(Halt);
                }
                let mut tok = self.token(TokenKind::Error);
                tok.reject(SyntaxError::ExpListSeparator { close });
                tok.skip_to_separator(close);
            }
        }
    }
}

/// Scope guard for one token.
///
/// Captures the start position on creation; on drop (or [`TokenScope::finish`])
/// captures the end position and appends the token. Dereferences to the
/// owning tokenizer so the value can be read inside the scope.
pub(crate) struct TokenScope<'a, S: Scan> {
    owner: &'a mut S,
    begin: Position,
    kind: Option<TokenKind>,
    value: TokenValue,
    done: bool,
}

impl<'a, S: Scan> TokenScope<'a, S> {
    fn open(owner: &'a mut S, kind: Option<TokenKind>) -> Self {
        let begin = owner.pos();
        Self {
            owner,
            begin,
            kind,
            value: TokenValue::None,
            done: false,
        }
    }

    pub(crate) fn set_kind(&mut self, kind: TokenKind) {
        self.kind = Some(kind);
    }

    pub(crate) fn set_value(&mut self, value: TokenValue) {
        self.value = value;
    }

    /// Turn this token into an error token.
    pub(crate) fn reject(&mut self, err: SyntaxError) {
        self.kind = Some(TokenKind::Error);
        self.value = TokenValue::Error(err);
    }

    /// Run a reader; a failure turns this token into an error token.
    pub(crate) fn expect<T>(
        &mut self,
        read: impl FnOnce(&mut S) -> Result<T, SyntaxError>,
    ) -> Parse<T> {
        match read(&mut *self.owner) {
            Ok(v) => Ok(v),
            Err(e) => {
                self.reject(e);
                Err(Halt)
            }
        }
    }

    /// Append the token now and return its span.
    pub(crate) fn finish(mut self) -> Span {
        self.append()
    }

    fn append(&mut self) -> Span {
        let span = Span::new(self.begin, self.owner.pos());
        if !self.done {
            self.done = true;
            let Some(kind) = self.kind else {
                panic!("token at {span} was finished without a kind");
            };
            let value = std::mem::take(&mut self.value);
            self.owner
                .scanner_mut()
                .tokens
                .push(Token { kind, value, span });
        }
        span
    }
}

impl<S: Scan> Deref for TokenScope<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.owner
    }
}

impl<S: Scan> DerefMut for TokenScope<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.owner
    }
}

impl<S: Scan> Drop for TokenScope<'_, S> {
    fn drop(&mut self) {
        if !self.done && !std::thread::panicking() {
            self.append();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bare(Scanner);

    impl Scan for Bare {
        fn scanner(&self) -> &Scanner {
            &self.0
        }
        fn scanner_mut(&mut self) -> &mut Scanner {
            &mut self.0
        }
    }

    fn bare(src: &str) -> Bare {
        Bare(Scanner::new(src, Position::new(1, 0)))
    }

    fn word(s: &mut Bare) -> Parse {
        let mut tok = s.token(TokenKind::String);
        if !tok.current().is_ascii_alphanumeric() {
            tok.reject(SyntaxError::ExpWord);
            return Err(Halt);
        }
        while tok.current().is_ascii_alphanumeric() {
            tok.advance();
        }
        drop(tok);
        s.skip_spaces();
        Ok(())
    }

    fn kinds(s: Bare) -> Vec<TokenKind> {
        s.0.into_tokens().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn scope_appends_on_early_return() {
        fn failing(s: &mut Bare) -> Parse {
            let mut tok = s.token(TokenKind::Number);
            tok.expect(|s| s.raw_char('x'))?;
            unreachable!()
        }
        let mut s = bare("y");
        assert_eq!(failing(&mut s), Err(Halt));
        let tokens = s.0.into_tokens();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert!(tokens[0].span.is_empty());
    }

    #[test]
    #[should_panic(expected = "finished without a kind")]
    fn untyped_scope_panics() {
        let mut s = bare("a");
        let _tok = s.untyped_token();
    }

    #[test]
    fn quoted_string_unescapes() {
        let mut s = bare(r#""a\"b" rest"#);
        assert_eq!(s.quoted_string().unwrap(), "a\"b");
        assert_eq!(s.current(), 'r');
    }

    #[test]
    fn quoted_string_stops_at_line_end() {
        let mut s = bare("\"abc\n\"");
        assert_eq!(s.quoted_string(), Err(SyntaxError::UnclosedString));
        assert_eq!(s.current(), '\n');
    }

    #[test]
    fn list_reads_elements() {
        let mut s = bare("[a, b ,c]");
        assert_eq!(s.bracketed('[', ']', false, word), Ok(()));
        assert_eq!(kinds(s), vec![TokenKind::String; 3]);
    }

    #[test]
    fn list_empty_allowed_or_not() {
        let mut s = bare("[ ]");
        assert_eq!(s.bracketed('[', ']', true, word), Ok(()));
        assert!(kinds(s).is_empty());

        let mut s = bare("[]");
        assert_eq!(s.bracketed('[', ']', false, word), Ok(()));
        let tokens = s.0.into_tokens();
        assert_eq!(tokens[0].error(), Some(&SyntaxError::AtLeastOneElement));
    }

    #[test]
    fn list_trailing_comma() {
        let mut s = bare("[a, ] x");
        assert_eq!(s.bracketed('[', ']', false, word), Ok(()));
        assert_eq!(s.current(), 'x');
        let tokens = s.0.into_tokens();
        assert_eq!(tokens[1].error(), Some(&SyntaxError::TrailingComma));
    }

    #[test]
    fn list_resyncs_after_junk() {
        let mut s = bare(r#"[a ?{,}"x,]" , b]"#);
        assert_eq!(s.bracketed('[', ']', false, word), Ok(()));
        let tokens = s.0.into_tokens();
        assert_eq!(tokens.len(), 3);
        assert_eq!(
            tokens[1].error(),
            Some(&SyntaxError::ExpListSeparator { close: ']' })
        );
        assert_eq!(tokens[2].kind, TokenKind::String);
    }

    #[test]
    fn list_missing_opener_and_closer() {
        let mut s = bare("a]");
        assert_eq!(s.bracketed('[', ']', false, word), Err(Halt));
        let tokens = s.0.into_tokens();
        assert_eq!(tokens[0].error(), Some(&SyntaxError::ExpChar { expected: '[' }));

        let mut s = bare("[a, b");
        assert_eq!(s.bracketed('[', ']', false, word), Err(Halt));
        let tokens = s.0.into_tokens();
        assert_eq!(
            tokens.last().and_then(Token::error),
            Some(&SyntaxError::UnclosedBracket { close: ']' })
        );
    }
}
