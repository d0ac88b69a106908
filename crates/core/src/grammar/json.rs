//! Single-line JSON values embedded in commands (`tellraw`, `titleraw`,
//! item components, dialogue scene text).

use mccmd_diagnostics::{Position, SyntaxError};

use super::scan::{Halt, Parse, Scan, Scanner};
use super::token::{Token, TokenKind, TokenValue};
use super::tokenizer::{MAX_NESTING, Tokenizer};

/// Top-level value a JSON argument must be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonShape {
    /// Any value.
    #[default]
    Any,
    /// `{...}`
    Object,
    /// `[...]`
    Array,
}

/// Which literal constants are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonDialect {
    /// `true` and `false` only. Commands use this.
    #[default]
    Strict,
    /// Also `null`.
    WithNull,
}

/// Tokenize one JSON value spanning all of `text`.
///
/// `text` must not contain a newline; anything after the value is reported
/// as [`SyntaxError::TooMuchJson`].
pub fn tokenize_json(
    text: &str,
    start: Position,
    shape: JsonShape,
    dialect: JsonDialect,
) -> Vec<Token> {
    JsonTokenizer::new(text, start, dialect).tokenize(shape)
}

struct JsonTokenizer {
    scanner: Scanner,
    dialect: JsonDialect,
    depth: usize,
}

impl Scan for JsonTokenizer {
    fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    fn scanner_mut(&mut self) -> &mut Scanner {
        &mut self.scanner
    }
}

impl JsonTokenizer {
    fn new(text: &str, start: Position, dialect: JsonDialect) -> Self {
        Self {
            scanner: Scanner::new(text, start),
            dialect,
            depth: 0,
        }
    }

    fn tokenize(mut self, shape: JsonShape) -> Vec<Token> {
        self.skip_spaces();
        let _ = match shape {
            JsonShape::Any => self.value(),
            JsonShape::Object => self.object(),
            JsonShape::Array => self.array(),
        };
        if !self.at_eof() {
            self.error_to_line_end(SyntaxError::TooMuchJson);
        }
        self.scanner.into_tokens()
    }

    fn value(&mut self) -> Parse {
        match self.current() {
            '"' => self
                .token(TokenKind::String)
                .expect(Self::quoted_string)
                .map(drop),
            '-' | '0'..='9' => {
                let mut tok = self.token(TokenKind::Number);
                let n = tok.expect(Self::number)?;
                tok.set_value(TokenValue::Number(n));
                Ok(())
            }
            '[' => self.nested(Self::array),
            '{' => self.nested(Self::object),
            _ => self.constant(),
        }
    }

    fn nested(&mut self, container: fn(&mut Self) -> Parse) -> Parse {
        if self.depth >= MAX_NESTING {
            log::warn!(
                "{}: JSON nested deeper than {MAX_NESTING}; skipping rest of value",
                self.pos()
            );
            self.error_to_line_end(SyntaxError::NestingTooDeep { limit: MAX_NESTING });
            return Err(Halt);
        }
        self.depth += 1;
        let result = container(self);
        self.depth -= 1;
        result
    }

    fn array(&mut self) -> Parse {
        self.bracketed('[', ']', true, Self::value)
    }

    fn object(&mut self) -> Parse {
        self.bracketed('{', '}', true, |t| {
            t.token(TokenKind::Option).expect(Self::quoted_string)?;
            t.expect_char(':')?;
            t.value()
        })
    }

    fn constant(&mut self) -> Parse {
        let mut len = 0;
        let mut c = self.current();
        while c.is_ascii_alphanumeric() {
            c = self.peek(len);
            len += 1;
        }
        let word: String = (0..len)
            .map(|k| if k == 0 { self.current() } else { self.peek(k - 1) })
            .collect();
        let (kind, value) = match word.as_str() {
            "true" => (TokenKind::Boolean, TokenValue::Boolean(true)),
            "false" => (TokenKind::Boolean, TokenValue::Boolean(false)),
            "null" if self.dialect == JsonDialect::WithNull => (TokenKind::Option, TokenValue::None),
            _ => {
                self.error_here(SyntaxError::ExpJson);
                return Err(Halt);
            }
        };
        let mut tok = self.token(kind);
        tok.set_value(value);
        for _ in 0..len {
            tok.advance();
        }
        drop(tok);
        self.skip_spaces();
        Ok(())
    }

    /// `-`? digits (`.` digits)?, then spaces. No leading `+`.
    fn number(&mut self) -> Result<f64, SyntaxError> {
        let mut text = String::new();
        if self.current() == '-' {
            text.push('-');
            self.advance();
        }
        if !self.current().is_ascii_digit() {
            return Err(SyntaxError::ExpNumber);
        }
        while self.current().is_ascii_digit() {
            text.push(self.current());
            self.advance();
        }
        if self.current() == '.' {
            text.push('.');
            self.advance();
            if !self.current().is_ascii_digit() {
                return Err(SyntaxError::IncompleteFloat);
            }
            while self.current().is_ascii_digit() {
                text.push(self.current());
                self.advance();
            }
        }
        self.skip_spaces();
        text.parse().map_err(|_| SyntaxError::ExpNumber)
    }
}

impl Tokenizer {
    /// A JSON value running to the end of the line.
    pub(crate) fn json(&mut self, shape: JsonShape) -> Parse {
        let start = self.pos();
        let text = self.skip_line();
        let tokens = tokenize_json(&text, start, shape, JsonDialect::Strict);
        self.push_tokens(tokens);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str, shape: JsonShape, dialect: JsonDialect) -> Vec<TokenKind> {
        tokenize_json(text, Position::new(1, 0), shape, dialect)
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn constant_length_is_counted_once() {
        let tokens = tokenize_json("true", Position::new(1, 0), JsonShape::Any, JsonDialect::Strict);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].value, TokenValue::Boolean(true));
        assert_eq!(tokens[0].span.end, Position::new(1, 4));
    }

    #[test]
    fn null_depends_on_dialect() {
        assert_eq!(
            kinds("null", JsonShape::Any, JsonDialect::WithNull),
            vec![TokenKind::Option]
        );
        assert_eq!(
            kinds("null", JsonShape::Any, JsonDialect::Strict),
            vec![TokenKind::Error, TokenKind::Error]
        );
    }

    #[test]
    fn nesting_is_capped() {
        let deep = "[".repeat(MAX_NESTING + 1);
        let tokens = tokenize_json(&deep, Position::new(1, 0), JsonShape::Any, JsonDialect::Strict);
        assert!(
            tokens
                .iter()
                .any(|t| matches!(t.error(), Some(SyntaxError::NestingTooDeep { .. })))
        );
    }
}
