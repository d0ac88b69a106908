//! The line loop and command dispatch.

use mccmd_diagnostics::{Position, Span, SyntaxError, Warning, WarningKind};

use super::registry::{GRAMMAR, RESTRICTED, canonical_name};
use super::scan::{Halt, Parse, Scan, Scanner};
use super::token::{Token, TokenKind, TokenValue};
use super::version::Version;

/// How deep `run` clauses may nest commands.
pub const MAX_NESTING: usize = 64;

/// One optional argument in a chain.
pub(crate) type Arg = fn(&mut Tokenizer) -> Parse;

/// Command tokenizer state for one parse call.
pub(crate) struct Tokenizer {
    scanner: Scanner,
    warnings: Vec<Warning>,
    version: Version,
    depth: usize,
}

impl Scan for Tokenizer {
    fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    fn scanner_mut(&mut self) -> &mut Scanner {
        &mut self.scanner
    }
}

impl Tokenizer {
    pub(crate) fn new(src: &str, start: Position, version: Version) -> Self {
        Self {
            scanner: Scanner::new(src, start),
            warnings: Vec::new(),
            version,
            depth: 0,
        }
    }

    pub(crate) fn version(&self) -> Version {
        self.version
    }

    /// Tokenize every line and hand back tokens and warnings.
    pub(crate) fn run(mut self) -> (Vec<Token>, Vec<Warning>) {
        while !self.at_eof() {
            self.line();
        }
        (self.scanner.into_tokens(), self.warnings)
    }

    pub(crate) fn warn(&mut self, kind: WarningKind, span: Span) {
        self.warnings.push(Warning::new(kind, span));
    }

    fn line(&mut self) {
        self.skip_spaces();
        if self.at_eof() {
            return;
        }
        match self.current() {
            '#' => {
                let mut tok = self.token(TokenKind::Comment);
                tok.advance();
                tok.skip_line();
            }
            '\n' => self.advance(),
            _ => self.command(),
        }
    }

    /// One command, followed by the too-many-arguments sweep.
    pub(crate) fn command(&mut self) {
        let _ = self.command_body();
        if self.line_not_end() {
            self.error_to_line_end(SyntaxError::TooManyArgs);
        }
    }

    fn command_body(&mut self) -> Parse {
        let mut tok = self.token(TokenKind::Command);
        let Ok(typed) = tok.expect(Self::word) else {
            tok.reject(SyntaxError::ExpCommand);
            tok.skip_line();
            return Err(Halt);
        };
        let name = canonical_name(&typed);
        let Some(rule) = GRAMMAR.command(name, tok.version) else {
            tok.reject(SyntaxError::UnknownCommand {
                command: name.to_owned(),
            });
            tok.skip_line();
            return Err(Halt);
        };
        tok.set_value(TokenValue::Command(name.to_owned()));
        let span = tok.finish();
        log::trace!("{span}: {name} (typed {typed:?})");
        if RESTRICTED.contains(&name) {
            self.warn(WarningKind::NoPermission { command: typed }, span);
        }
        rule(self)
    }

    /// A command nested inside another one, bounded by [`MAX_NESTING`].
    pub(crate) fn nested_command(&mut self) -> Parse {
        if self.depth >= MAX_NESTING {
            log::warn!(
                "{}: commands nested deeper than {MAX_NESTING}; skipping rest of line",
                self.pos()
            );
            self.error_to_line_end(SyntaxError::NestingTooDeep { limit: MAX_NESTING });
            return Err(Halt);
        }
        self.depth += 1;
        self.command();
        self.depth -= 1;
        Ok(())
    }

    /// Read optional trailing arguments in order. Each is attempted only if
    /// the line continues and every earlier one parsed.
    pub(crate) fn chain(&mut self, args: &[Arg]) -> Parse {
        for arg in args {
            if !self.line_not_end() {
                break;
            }
            arg(self)?;
        }
        Ok(())
    }
}
