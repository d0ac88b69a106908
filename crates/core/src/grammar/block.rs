//! Block states and the version-dependent suffix that follows a block id.

use mccmd_diagnostics::{SyntaxError, WarningKind};

use super::registry::GRAMMAR;
use super::scan::{Halt, Parse, Scan};
use super::token::{TokenKind, TokenValue};
use super::tokenizer::Tokenizer;

impl Tokenizer {
    /// The block suffix in effect for this tokenizer's version.
    pub(crate) fn block_suffix(&mut self) -> Parse {
        let rule = GRAMMAR.block_suffix.resolve(self.version()).copied();
        match rule {
            Some(rule) => rule(self),
            None => Ok(()),
        }
    }

    /// `["key": value, ...]` where values are strings, integers or booleans.
    pub(crate) fn block_states(&mut self) -> Parse {
        self.bracketed('[', ']', true, |t| {
            t.token(TokenKind::Option).expect(|t| t.quoted_string())?;
            t.expect_char(':')?;
            if t.current() == '"' {
                t.token(TokenKind::String)
                    .expect(|t| t.quoted_string())
                    .map(drop)
            } else if t.next_is_number() {
                t.int_any()
            } else {
                let mut tok = t.token(TokenKind::Boolean);
                let word = tok.expect(Tokenizer::word)?;
                match word.as_str() {
                    "true" | "false" => tok.set_value(TokenValue::Boolean(word == "true")),
                    _ => tok.reject(SyntaxError::ExpBsValue),
                }
                Ok(())
            }
        })
    }
}

/// Before 1.19.70: a data value in `-1..=32767` or block states.
pub(crate) fn data_or_states(t: &mut Tokenizer) -> Parse {
    if t.next_is_number() {
        let mut tok = t.token(TokenKind::Number);
        let data = tok.expect(Tokenizer::integer)?;
        tok.set_value(TokenValue::Number(data.into()));
        if !(-1..=32767).contains(&data) {
            tok.reject(SyntaxError::out_of_range(-1, 32767));
        }
        let span = tok.finish();
        t.warn(WarningKind::BlockData, span);
        Ok(())
    } else if t.current() == '[' {
        t.block_states()
    } else {
        t.error_to_line_end(SyntaxError::ExpBsDv);
        Err(Halt)
    }
}

/// From 1.19.70: block states only, and they may be left out.
pub(crate) fn states_only(t: &mut Tokenizer) -> Parse {
    if t.current() == '[' {
        return t.block_states();
    }
    if t.next_is_number() {
        let mut tok = t.token(TokenKind::Error);
        tok.reject(SyntaxError::ExpBlockState);
        let _ = tok.integer();
        return Err(Halt);
    }
    Ok(())
}
