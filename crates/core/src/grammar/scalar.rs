//! Primitive argument readers and the token helpers built on them.
//!
//! Readers return `Result<_, SyntaxError>` and, unless prefixed `raw_`,
//! enforce argument-terminator discipline: the value must be followed by a
//! terminating character, and a run of spaces after it is consumed. Quoted
//! strings and single characters skip the terminator check.

use mccmd_diagnostics::{SyntaxError, quote_options};

use super::cursor::is_number_start;
use super::scan::{Halt, Parse, Scan};
use super::token::{TokenKind, TokenValue};
use super::tokenizer::Tokenizer;

/// How a position component is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PosKind {
    Absolute,
    /// `~`
    Relative,
    /// `^`
    Local,
}

fn is_numlike(text: &str) -> bool {
    text.parse::<f64>().is_ok()
}

fn is_id_char(c: char) -> bool {
    matches!(c, '0'..='9' | 'a'..='z' | '_' | '-' | '.' | ':')
}

// ── Readers ─────────────────────────────────────────────────────────────

impl Tokenizer {
    pub(crate) fn next_is_number(&self) -> bool {
        is_number_start(self.current())
    }

    pub(crate) fn next_is_pos(&self) -> bool {
        self.next_is_number() || matches!(self.current(), '~' | '^')
    }

    pub(crate) fn next_is_rotation(&self) -> bool {
        self.next_is_number() || self.current() == '~'
    }

    pub(crate) fn next_is_terminating(&self) -> bool {
        self.terminates_at(0)
    }

    /// If the first non-space character satisfies `accept`, move onto it.
    fn skip_spaces_until(&mut self, accept: impl Fn(char) -> bool) -> bool {
        let mut k = 0;
        if self.current() == ' ' {
            while self.peek(k) == ' ' {
                k += 1;
            }
            if !accept(self.peek(k)) {
                return false;
            }
            for _ in 0..=k {
                self.advance();
            }
            true
        } else {
            accept(self.current())
        }
    }

    pub(crate) fn argument_end(&mut self) -> Result<(), SyntaxError> {
        if !self.next_is_terminating() {
            return Err(SyntaxError::ExpTerminatingChar);
        }
        self.skip_spaces();
        Ok(())
    }

    fn take_until_terminator(&mut self) -> String {
        let mut text = String::new();
        while !self.next_is_terminating() {
            text.push(self.current());
            self.advance();
        }
        text
    }

    pub(crate) fn raw_word(&mut self) -> Result<String, SyntaxError> {
        let text = self.take_until_terminator();
        if text.is_empty() {
            return Err(SyntaxError::ExpWord);
        }
        if is_numlike(&text) {
            return Err(SyntaxError::NumlikeWord);
        }
        Ok(text)
    }

    pub(crate) fn word(&mut self) -> Result<String, SyntaxError> {
        let text = self.raw_word()?;
        self.argument_end()?;
        Ok(text)
    }

    /// A word or a quoted string.
    pub(crate) fn string(&mut self) -> Result<String, SyntaxError> {
        if self.current() == '"' {
            self.quoted_string()
        } else {
            self.word()
        }
    }

    pub(crate) fn namespaced_id(&mut self) -> Result<String, SyntaxError> {
        let text = self.take_until_terminator();
        if text.is_empty() {
            return Err(SyntaxError::ExpId);
        }
        if !text.chars().all(is_id_char) {
            return Err(SyntaxError::IllegalCharInId);
        }
        if text.matches(':').count() > 1 {
            return Err(SyntaxError::MultipleColonsInId);
        }
        if is_numlike(&text) {
            return Err(SyntaxError::NumlikeId);
        }
        self.skip_spaces();
        Ok(text)
    }

    fn take_sign(&mut self, text: &mut String) {
        if matches!(self.current(), '-' | '+') {
            text.push(self.current());
            self.advance();
        }
    }

    fn take_digits(&mut self, text: &mut String) {
        while self.current().is_ascii_digit() {
            text.push(self.current());
            self.advance();
        }
    }

    pub(crate) fn raw_integer(&mut self) -> Result<i32, SyntaxError> {
        let mut text = String::new();
        self.take_sign(&mut text);
        if !self.current().is_ascii_digit() {
            return Err(SyntaxError::ExpInteger);
        }
        self.take_digits(&mut text);
        text.parse::<i32>()
            .map_err(|_| SyntaxError::IntegerOverflow)
    }

    pub(crate) fn integer(&mut self) -> Result<i32, SyntaxError> {
        let n = self.raw_integer()?;
        self.argument_end()?;
        Ok(n)
    }

    pub(crate) fn raw_number(&mut self) -> Result<f64, SyntaxError> {
        let mut text = String::new();
        self.take_sign(&mut text);
        if !self.current().is_ascii_digit() {
            return Err(SyntaxError::ExpNumber);
        }
        self.take_digits(&mut text);
        if self.current() == '.' {
            text.push('.');
            self.advance();
            if !self.current().is_ascii_digit() {
                return Err(SyntaxError::IncompleteFloat);
            }
            self.take_digits(&mut text);
        }
        text.parse::<f64>().map_err(|_| SyntaxError::ExpNumber)
    }

    pub(crate) fn number(&mut self) -> Result<f64, SyntaxError> {
        let n = self.raw_number()?;
        self.argument_end()?;
        Ok(n)
    }

    /// `true` or `false`.
    pub(crate) fn boolean(&mut self) -> Result<bool, SyntaxError> {
        let value = match self.raw_word()?.as_str() {
            "true" => true,
            "false" => false,
            _ => return Err(SyntaxError::ExpBool),
        };
        self.argument_end()?;
        Ok(value)
    }

    /// `!`? start? (`..` end?)? with at least one bound and start <= end.
    pub(crate) fn number_range(&mut self) -> Result<(), SyntaxError> {
        if self.current() == '!' {
            self.char('!')?;
        }
        let start = if self.next_is_number() {
            Some(self.raw_integer()?)
        } else {
            None
        };
        let mut end = None;
        if self.skip_spaces_until(|c| c == '.') {
            self.advance();
            self.raw_char('.')?;
            if self.skip_spaces_until(is_number_start) {
                end = Some(self.raw_integer()?);
            }
        }
        match (start, end) {
            (None, None) => return Err(SyntaxError::ExpIntRange),
            (Some(s), Some(e)) if s > e => return Err(SyntaxError::ImpossibleRange),
            _ => {}
        }
        self.argument_end()
    }

    /// One coordinate: `~n`, `^n`, or an absolute number.
    pub(crate) fn pos_component(&mut self) -> Result<PosKind, SyntaxError> {
        let kind = match self.current() {
            '~' => PosKind::Relative,
            '^' => PosKind::Local,
            _ => PosKind::Absolute,
        };
        if kind == PosKind::Absolute {
            if !self.next_is_number() {
                return Err(SyntaxError::ExpPos);
            }
            self.raw_number()?;
        } else {
            self.advance();
            if self.next_is_number() {
                self.raw_number()?;
            }
        }
        self.argument_end()?;
        Ok(kind)
    }
}

// ── Token helpers ───────────────────────────────────────────────────────

impl Tokenizer {
    /// A namespaced identifier as a string token.
    pub(crate) fn id_token(&mut self) -> Parse<String> {
        self.token(TokenKind::String).expect(Self::namespaced_id)
    }

    pub(crate) fn string_token(&mut self) -> Parse<String> {
        self.token(TokenKind::String).expect(Self::string)
    }

    pub(crate) fn word_token(&mut self) -> Parse {
        self.token(TokenKind::String).expect(Self::word).map(drop)
    }

    pub(crate) fn scoreboard_token(&mut self) -> Parse {
        self.token(TokenKind::Scoreboard)
            .expect(Self::string)
            .map(drop)
    }

    pub(crate) fn boolean_token(&mut self) -> Parse<bool> {
        let mut tok = self.token(TokenKind::Boolean);
        let value = tok.expect(Self::boolean)?;
        tok.set_value(TokenValue::Boolean(value));
        Ok(value)
    }

    /// An integer token, rejected (without halting) outside `[min, max]`.
    pub(crate) fn checked_int(&mut self, min: i32, max: Option<i32>) -> Parse<i32> {
        let mut tok = self.token(TokenKind::Number);
        let n = tok.expect(Self::integer)?;
        tok.set_value(TokenValue::Number(n.into()));
        if n < min || max.is_some_and(|max| n > max) {
            tok.reject(SyntaxError::NumberOutOfRange {
                min: min.into(),
                max: max.map(f64::from),
            });
        }
        Ok(n)
    }

    /// A number token, rejected (without halting) outside `[min, max]`.
    pub(crate) fn checked_num(&mut self, min: Option<f64>, max: Option<f64>) -> Parse<f64> {
        let mut tok = self.token(TokenKind::Number);
        let n = tok.expect(Self::number)?;
        tok.set_value(TokenValue::Number(n));
        if let Some(min) = min {
            if n < min || max.is_some_and(|max| n > max) {
                tok.reject(SyntaxError::NumberOutOfRange { min, max });
            }
        }
        Ok(n)
    }

    pub(crate) fn int_any(&mut self) -> Parse {
        self.checked_int(i32::MIN, None).map(drop)
    }

    pub(crate) fn int_in(&mut self, min: i32, max: i32) -> Parse {
        self.checked_int(min, Some(max)).map(drop)
    }

    pub(crate) fn int_at_least(&mut self, min: i32) -> Parse {
        self.checked_int(min, None).map(drop)
    }

    pub(crate) fn num_any(&mut self) -> Parse {
        self.checked_num(None, None).map(drop)
    }

    pub(crate) fn num_in(&mut self, min: f64, max: f64) -> Parse {
        self.checked_num(Some(min), Some(max)).map(drop)
    }

    pub(crate) fn num_at_least(&mut self, min: f64) -> Parse {
        self.checked_num(Some(min), None).map(drop)
    }

    pub(crate) fn range_token(&mut self) -> Parse {
        self.token(TokenKind::Number)
            .expect(Self::number_range)
    }

    /// A keyword from a fixed set.
    pub(crate) fn options(&mut self, allowed: &[&'static str]) -> Parse<&'static str> {
        let mut tok = self.token(TokenKind::Option);
        let word = tok.expect(Self::word)?;
        match allowed.iter().find(|o| **o == word) {
            Some(option) => Ok(*option),
            None => {
                tok.reject(SyntaxError::InvalidOption {
                    option: word,
                    allowed: quote_options(allowed),
                });
                Err(Halt)
            }
        }
    }

    /// `true`/`false` or a keyword from `allowed`. `None` means a boolean.
    pub(crate) fn bool_or_options(
        &mut self,
        allowed: &[&'static str],
    ) -> Parse<Option<&'static str>> {
        let mut tok = self.untyped_token();
        let word = tok.expect(Self::word)?;
        if let Some(option) = allowed.iter().find(|o| **o == word) {
            tok.set_kind(TokenKind::Option);
            return Ok(Some(*option));
        }
        match word.as_str() {
            "true" | "false" => {
                tok.set_kind(TokenKind::Boolean);
                tok.set_value(TokenValue::Boolean(word == "true"));
                Ok(None)
            }
            _ => {
                tok.reject(SyntaxError::ExpBoolOrOption {
                    options: quote_options(allowed),
                });
                Err(Halt)
            }
        }
    }

    pub(crate) fn pos_token(&mut self) -> Parse<PosKind> {
        self.token(TokenKind::Position).expect(Self::pos_component)
    }

    /// `dimension` position components; `~` and `^` may not be mixed.
    pub(crate) fn full_pos(&mut self, dimension: usize) -> Parse {
        let (mut relative, mut local) = (false, false);
        for _ in 0..dimension {
            let mut tok = self.token(TokenKind::Position);
            match tok.expect(Self::pos_component)? {
                PosKind::Relative => relative = true,
                PosKind::Local => local = true,
                PosKind::Absolute => {}
            }
            if relative && local {
                tok.reject(SyntaxError::LocalPosWithRelative);
            }
        }
        Ok(())
    }

    pub(crate) fn pos3(&mut self) -> Parse {
        self.full_pos(3)
    }

    /// A rotation: `~`, `~n`, or a number.
    pub(crate) fn rotation(&mut self) -> Parse {
        let mut tok = self.token(TokenKind::Position);
        if tok.current() == '~' {
            tok.advance();
            if tok.next_is_number() {
                tok.expect(Self::number)?;
            }
        } else {
            tok.expect(Self::number)?;
        }
        drop(tok);
        self.skip_spaces();
        Ok(())
    }

    /// The rest of the line as one string token; empty text is `missing`.
    pub(crate) fn rest_of_line(&mut self, missing: SyntaxError) -> Parse {
        let mut tok = self.token(TokenKind::String);
        if tok.skip_line().is_empty() {
            tok.reject(missing);
        }
        Ok(())
    }

    pub(crate) fn message(&mut self) -> Parse {
        self.rest_of_line(SyntaxError::ExpMessage)
    }

    /// Either `*` or a namespaced identifier.
    pub(crate) fn spawn_event(&mut self) -> Parse {
        if self.current() == '*' {
            self.token(TokenKind::String).expect(|t| t.char('*'))
        } else {
            self.id_token().map(drop)
        }
    }

    /// A game mode number or keyword.
    pub(crate) fn gamemode(&mut self) -> Parse {
        if !self.next_is_number() {
            return self
                .options(&["s", "c", "a", "d", "survival", "default", "creative", "adventure"])
                .map(drop);
        }
        let mut tok = self.token(TokenKind::Option);
        let id = tok.expect(Self::integer)?;
        if !matches!(id, 0 | 1 | 2 | 5) {
            tok.reject(SyntaxError::InvalidGamemodeId);
        }
        Ok(())
    }
}
