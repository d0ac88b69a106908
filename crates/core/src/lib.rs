//! Minecraft Bedrock command tokenizer.
//!
//! Turns `.mcfunction` text into a classified, positioned token stream plus a
//! separate warning list, reproducing the grammar of a chosen game version.
//! The main entry point is [`tokenize`]; embedded JSON can be tokenized on its
//! own with [`tokenize_json`].

#![warn(missing_docs)]

/// Command grammar: cursor, readers, selector and JSON sub-grammars, and the
/// version-dispatched command table.
pub mod grammar;

use mccmd_diagnostics::{Diagnostic, SyntaxError};
use serde::Serialize;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Tokens
pub use grammar::token::{Token, TokenKind, TokenValue};

// Versions
pub use grammar::version::{Version, VersionError, Versioned};

// JSON
pub use grammar::json::{JsonDialect, JsonShape, tokenize_json};

// Diagnostics (re-exported from the diagnostics crate)
pub use mccmd_diagnostics::{
    self as diagnostics, Position, Severity, Span, Warning, WarningKind, codes,
};

// Serialization helpers
pub use grammar::dump::to_pretty_json;

pub use grammar::MAX_NESTING;

/// Output of one [`tokenize`] call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenizeResult {
    /// Tokens in source order, error tokens included.
    pub tokens: Vec<Token>,
    /// Warnings, in the order they were found.
    pub warnings: Vec<Warning>,
}

impl TokenizeResult {
    /// Error tokens with their errors.
    pub fn errors(&self) -> impl Iterator<Item = (&Token, &SyntaxError)> {
        self.tokens.iter().filter_map(|t| t.error().map(|e| (t, e)))
    }

    /// True if any token is an error token.
    pub fn has_errors(&self) -> bool {
        self.tokens.iter().any(Token::is_error)
    }

    /// Errors and warnings as diagnostics, ordered by position.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut out: Vec<Diagnostic> = self
            .errors()
            .map(|(tok, err)| Diagnostic::from_syntax_error(err, tok.span))
            .chain(self.warnings.iter().map(Diagnostic::from_warning))
            .collect();
        out.sort_by_key(|d| d.span.map(|s| s.begin));
        out
    }
}

/// Tokenize `src`, whose first character sits at `start`, using the grammar
/// of `version`.
///
/// Never fails: malformed input becomes error tokens.
pub fn tokenize(src: &str, start: Position, version: Version) -> TokenizeResult {
    let (tokens, warnings) = grammar::Tokenizer::new(src, start, version).run();
    log::debug!(
        "tokenized {} line(s) from {start} for {version}: {} token(s), {} warning(s)",
        src.lines().count(),
        tokens.len(),
        warnings.len()
    );
    TokenizeResult { tokens, warnings }
}
