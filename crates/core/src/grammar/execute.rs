//! `execute`, in its legacy and subcommand-chain forms.

use mccmd_diagnostics::SyntaxError;

use super::cursor::is_terminating;
use super::scan::{Parse, Scan};
use super::token::TokenKind;
use super::tokenizer::Tokenizer;

const SUBCOMMANDS: &[&str] = &[
    "align",
    "anchored",
    "as",
    "at",
    "facing",
    "in",
    "positioned",
    "rotated",
    "run",
    "if",
    "unless",
];

const CONDITIONS: &[&str] = &["block", "blocks", "entity", "score"];

/// `execute <origin> <position> [detect <position> <block> <data>] <command>`
pub(crate) fn legacy(t: &mut Tokenizer) -> Parse {
    t.target()?;
    t.pos3()?;
    if t.current() == 'd' && t.peek_word() == "detect" {
        t.options(&["detect"])?;
        t.pos3()?;
        t.id_token()?;
        t.block_suffix()?;
    }
    t.nested_command()
}

/// `execute <subcommand>...`, ending in `run`, `if` or `unless`.
pub(crate) fn chain(t: &mut Tokenizer) -> Parse {
    if !t.line_not_end() {
        t.error_here(SyntaxError::ExpExecuteSubcmd);
        return Ok(());
    }
    let mut last = None;
    while t.line_not_end() {
        let subcommand = t.options(SUBCOMMANDS)?;
        last = Some(subcommand);
        match subcommand {
            "align" => align(t)?,
            "anchored" => anchor(t)?,
            "as" | "at" => t.target()?,
            "facing" => {
                if t.next_is_pos() {
                    t.pos3()?;
                } else {
                    t.options(&["entity"])?;
                    t.target()?;
                    anchor(t)?;
                }
            }
            "in" => t.id_token().map(drop)?,
            "positioned" => {
                if t.next_is_pos() {
                    t.pos3()?;
                } else {
                    t.options(&["as"])?;
                    t.target()?;
                }
            }
            "rotated" => {
                if t.next_is_rotation() {
                    t.rotation()?;
                    t.rotation()?;
                } else {
                    t.options(&["as"])?;
                    t.target()?;
                }
            }
            "run" => t.nested_command()?,
            _ => condition(t)?,
        }
    }
    if !matches!(last, Some("run" | "if" | "unless")) {
        t.error_here(SyntaxError::WrongExecuteEnd);
    }
    Ok(())
}

fn anchor(t: &mut Tokenizer) -> Parse {
    t.options(&["eyes", "feet"]).map(drop)
}

/// Axes like `xz`: only `x`, `y` and `z`, each at most once.
fn align(t: &mut Tokenizer) -> Parse {
    let mut tok = t.token(TokenKind::Option);
    let axes = tok.expect(Tokenizer::word)?;
    let mut seen = [false; 3];
    for c in axes.chars() {
        let Some(i) = "xyz".find(c) else {
            tok.reject(SyntaxError::IllegalCharInAxes);
            return Ok(());
        };
        if seen[i] {
            tok.reject(SyntaxError::RepeatCharInAxes);
            return Ok(());
        }
        seen[i] = true;
    }
    Ok(())
}

/// The clause after `if` or `unless`.
fn condition(t: &mut Tokenizer) -> Parse {
    match t.options(CONDITIONS)? {
        "block" => {
            t.pos3()?;
            t.id_token()?;
            if t.current() == '[' || t.next_is_number() {
                t.block_suffix()?;
            }
        }
        "blocks" => {
            for _ in 0..3 {
                t.pos3()?;
            }
            t.options(&["all", "masked"])?;
        }
        "entity" => t.target()?,
        _ => {
            t.target()?;
            t.scoreboard_token()?;
            if compare_operator(t) {
                t.target()?;
                t.scoreboard_token()?;
            } else {
                t.options(&["matches"])?;
                t.range_token()?;
            }
        }
    }
    Ok(())
}

/// `<`, `<=`, `=`, `>=` or `>` as an option token. False if none is present.
fn compare_operator(t: &mut Tokenizer) -> bool {
    if !matches!(t.current(), '<' | '>' | '=') {
        return false;
    }
    {
        let mut tok = t.token(TokenKind::Option);
        let first = tok.current();
        tok.advance();
        if first != '=' && tok.current() == '=' {
            tok.advance();
        }
    }
    t.skip_spaces();
    true
}

impl Tokenizer {
    /// The unquoted word under the cursor, without consuming it.
    pub(crate) fn peek_word(&self) -> String {
        (0..)
            .map_while(|k| self.char_at(k))
            .take_while(|&c| !is_terminating(c))
            .collect()
    }
}
