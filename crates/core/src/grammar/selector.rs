//! Target selectors: bare names and `@x[option=value, ...]`.

use mccmd_diagnostics::{SyntaxError, WarningKind};

use super::registry::GRAMMAR;
use super::scalar::PosKind;
use super::scan::{Halt, Parse, Scan};
use super::token::{TokenKind, TokenValue};
use super::tokenizer::Tokenizer;

/// Selector variables accepted after `@`.
pub(crate) const SELECTOR_TYPES: &[&str] = &["a", "e", "r", "s", "p", "c", "v", "initiator"];

/// Options accepted inside `@x[...]` before 1.19.80.
pub(crate) const BASE_OPTIONS: &[&str] = &[
    "x", "y", "z", "dx", "dy", "dz", "r", "rm", "scores", "tag", "name", "type", "family", "rx",
    "rxm", "ry", "rym", "hasitem", "l", "lm", "m", "c",
];

/// [`BASE_OPTIONS`] plus `haspermission`.
pub(crate) const OPTIONS_1_19_80: &[&str] = &[
    "x", "y", "z", "dx", "dy", "dz", "r", "rm", "scores", "tag", "name", "type", "family", "rx",
    "rxm", "ry", "rym", "hasitem", "l", "lm", "m", "c", "haspermission",
];

const HASITEM_KEYS: &[&str] = &["item", "data", "quantity", "location", "slot"];

/// Permissions shared by `haspermission` and `inputpermission`.
pub(crate) const PERMISSIONS: &[&str] = &["camera", "movement"];

const PERMISSION_STATES: &[&str] = &["enabled", "disabled"];

impl Tokenizer {
    /// A player name, quoted name, or `@` selector.
    pub(crate) fn target(&mut self) -> Parse {
        if self.current() != '@' {
            return self
                .token(TokenKind::Selector)
                .expect(Self::string)
                .map(drop);
        }
        {
            let mut tok = self.token(TokenKind::Selector);
            tok.advance();
            if let Ok(var) = tok.expect(Self::word) {
                if !SELECTOR_TYPES.contains(&var.as_str()) {
                    tok.reject(SyntaxError::InvalidSelectorType { var });
                }
            }
        }
        if self.current() == '[' {
            self.bracketed('[', ']', false, selector_option)?;
        }
        self.skip_spaces();
        Ok(())
    }

    /// A target, or `*` for every tracked entity.
    pub(crate) fn starrable_target(&mut self) -> Parse {
        if self.current() == '*' {
            self.token(TokenKind::Selector).expect(|t| t.char('*'))
        } else {
            self.target()
        }
    }

    /// `enabled` or `disabled`.
    pub(crate) fn permission_state(&mut self) -> Parse {
        let mut tok = self.token(TokenKind::Option);
        let state = tok.expect(Self::word)?;
        if !PERMISSION_STATES.contains(&state.as_str()) {
            tok.reject(SyntaxError::ExpState);
        }
        Ok(())
    }

    fn skip_negation(&mut self) {
        if self.current() == '!' {
            self.advance();
            self.skip_spaces();
        }
    }
}

fn selector_option(t: &mut Tokenizer) -> Parse {
    let allowed = GRAMMAR
        .selector_options
        .resolve(t.version())
        .copied()
        .unwrap_or(BASE_OPTIONS);
    let option = {
        let mut tok = t.token(TokenKind::Option);
        let option = tok.expect(Tokenizer::word)?;
        if !allowed.contains(&option.as_str()) {
            // The value shape is unknown, so nothing after it can be trusted.
            tok.reject(SyntaxError::InvalidSelectorArg { arg: option });
            tok.skip_line();
            return Err(Halt);
        }
        option
    };
    t.expect_char('=')?;
    match option.as_str() {
        "r" | "rm" => t.num_at_least(0.0),
        "dx" | "dy" | "dz" | "rx" | "rxm" | "ry" | "rym" => t.num_any(),
        "c" => t.int_any(),
        "l" | "lm" => t.int_at_least(0),
        "name" | "family" => {
            t.skip_negation();
            t.string_token().map(drop)
        }
        "type" => {
            t.skip_negation();
            t.id_token().map(drop)
        }
        "x" | "y" | "z" => {
            let mut tok = t.token(TokenKind::Position);
            if tok.expect(Tokenizer::pos_component)? == PosKind::Local {
                tok.reject(SyntaxError::LocalPosForSelector);
            }
            Ok(())
        }
        "scores" => t.bracketed('{', '}', false, |t| {
            t.scoreboard_token()?;
            t.expect_char('=')?;
            t.range_token()
        }),
        "tag" => {
            t.skip_negation();
            // `tag=` with nothing after it is a valid, empty tag.
            if !t.next_is_terminating() || t.current() == '"' {
                t.token(TokenKind::Tag).expect(Tokenizer::string)?;
            }
            Ok(())
        }
        "hasitem" => {
            if t.current() == '[' {
                t.bracketed('[', ']', false, hasitem_object)
            } else {
                hasitem_object(t)
            }
        }
        "haspermission" => t.bracketed('{', '}', false, |t| {
            t.options(PERMISSIONS)?;
            t.expect_char('=')?;
            t.permission_state()
        }),
        "m" => t.gamemode(),
        other => unreachable!("selector option {other:?} has no value grammar"),
    }
}

/// One `{item=..., data=..., ...}` object; `item` is required.
fn hasitem_object(t: &mut Tokenizer) -> Parse {
    let mut has_item = false;
    t.bracketed('{', '}', false, |t| {
        let key = {
            let mut tok = t.token(TokenKind::Option);
            let key = tok.expect(Tokenizer::word)?;
            if !HASITEM_KEYS.contains(&key.as_str()) {
                tok.reject(SyntaxError::InvalidHasitemArg { arg: key });
                tok.skip_to_separator('}');
                return Ok(());
            }
            key
        };
        has_item |= key == "item";
        t.expect_char('=')?;
        match key.as_str() {
            "item" => t.id_token().map(drop),
            "data" => hasitem_data(t),
            "quantity" | "slot" => t.range_token(),
            _ => t.word_token(),
        }
    })?;
    if !has_item {
        t.error_here(SyntaxError::HasitemMissingItem);
    }
    Ok(())
}

fn hasitem_data(t: &mut Tokenizer) -> Parse {
    let mut tok = t.token(TokenKind::Number);
    let data = tok.expect(Tokenizer::integer)?;
    tok.set_value(TokenValue::Number(data.into()));
    let in_range = (-1..=32767).contains(&data);
    if !in_range {
        tok.reject(SyntaxError::out_of_range(-1, 32767));
    }
    let span = tok.finish();
    if in_range && data < 0 {
        t.warn(WarningKind::DangerousHasitemData, span);
    }
    Ok(())
}
