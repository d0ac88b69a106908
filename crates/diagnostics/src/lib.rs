//! Diagnostics for the Bedrock command tokenizer.
//!
//! Provides [`Position`] and [`Span`] in the caller's line/column frame, the
//! closed [`SyntaxError`] and [`WarningKind`] taxonomies, and the flattened
//! [`Diagnostic`] record that presentation layers consume. Diagnostic codes
//! are defined in the [`codes`] module.

#![warn(missing_docs)]

/// Diagnostic ID constants.
pub mod codes;
mod error;
mod warning;

pub use error::{SyntaxError, quote_options};
pub use warning::{Warning, WarningKind};

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

// ── Position / Span ──────────────────────────────────────────────────────

/// A (line, column) location.
///
/// Ordering is lexicographic: line first, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number in the caller's frame.
    pub line: usize,
    /// Column in characters.
    pub column: usize,
}

impl Position {
    /// Create a position.
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    /// Line 1, column 0.
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.line, self.column)
    }
}

/// A half-open range of source positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Position of the first character.
    pub begin: Position,
    /// Position one past the last character.
    pub end: Position,
}

impl Span {
    /// Create a span covering `[begin, end)`.
    ///
    /// Panics if `end < begin`.
    pub fn new(begin: Position, end: Position) -> Self {
        assert!(end >= begin, "Span end ({end}) < begin ({begin})");
        Self { begin, end }
    }

    /// Create a zero-width span at the given position.
    pub fn empty(pos: Position) -> Self {
        Self {
            begin: pos,
            end: pos,
        }
    }

    /// True when the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.begin, self.end)
    }
}

// ── LineIndex ────────────────────────────────────────────────────────────

/// Maps [`Position`]s back to character offsets into the tokenized text.
///
/// Renderers that address source by offset need this; the tokenizer itself
/// only deals in positions. The first line starts at `first.column`, every
/// later line at column 0.
#[derive(Debug, Clone)]
pub struct LineIndex {
    first: Position,
    /// Char offset of the start of each line.
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Build a `LineIndex` for `text` tokenized from `first`.
    pub fn new(text: &str, first: Position) -> Self {
        let mut line_starts = vec![0usize];
        let mut len = 0;
        for (i, c) in text.chars().enumerate() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
            len = i + 1;
        }
        Self {
            first,
            line_starts,
            len,
        }
    }

    /// Char offset of `pos`, clamped to the end of the text.
    ///
    /// Returns `None` for positions on lines outside the text.
    pub fn offset(&self, pos: Position) -> Option<usize> {
        let row = pos.line.checked_sub(self.first.line)?;
        let start = *self.line_starts.get(row)?;
        let column = if row == 0 {
            pos.column.checked_sub(self.first.column)?
        } else {
            pos.column
        };
        Some((start + column).min(self.len))
    }

    /// Position of the given char offset.
    pub fn position(&self, offset: usize) -> Position {
        let row = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next.saturating_sub(1),
        };
        let column = offset - self.line_starts[row];
        if row == 0 {
            Position::new(self.first.line, self.first.column + column)
        } else {
            Position::new(self.first.line + row, column)
        }
    }

    /// Total number of lines (at least 1, even for empty input).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

// ── Diagnostic ───────────────────────────────────────────────────────────

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// The command will not run as written.
    Error,
    /// The command runs but is discouraged or restricted.
    Warn,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warn => write!(f, "warn"),
        }
    }
}

/// A flattened error or warning, ready for display or serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unique diagnostic code (e.g., `"MCC1101"`).
    pub id: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable diagnostic message.
    pub message: String,
    /// Source range this diagnostic relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Named message parameters. Absent when the kind has none.
    ///
    /// Uses `BTreeMap` for deterministic key ordering in serialized output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    /// Create a diagnostic with the given fields.
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        severity: Severity,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// Shorthand for an `Error` diagnostic.
    pub fn error(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Error, message, span)
    }

    /// Shorthand for a `Warn` diagnostic.
    pub fn warn(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Warn, message, span)
    }

    /// Flatten a grammar error found at `span`.
    pub fn from_syntax_error(err: &SyntaxError, span: Span) -> Self {
        let d = Self::error(err.code(), err.to_string(), Some(span));
        let params = err.params();
        if params.is_empty() {
            d
        } else {
            d.with_context(params)
        }
    }

    /// Flatten a warning.
    pub fn from_warning(w: &Warning) -> Self {
        let d = Self::warn(w.kind.code(), w.kind.to_string(), Some(w.span));
        match &w.kind {
            WarningKind::NoPermission { command } => {
                d.with_context(BTreeMap::from([("command".into(), command.clone())]))
            }
            _ => d,
        }
    }

    /// Attach machine-readable context metadata (builder pattern).
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// The message prefixed by its span: `{begin}-{end}: {message}`.
    pub fn located_message(&self) -> String {
        match self.span {
            Some(span) => format!("{span}: {}", self.message),
            None => self.message.clone(),
        }
    }

    /// Returns the human-readable explanation for this diagnostic's code, if available.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.id)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.id, self.message)
    }
}

/// Returns the human-readable explanation for a diagnostic code, if known.
pub fn explain(id: &str) -> Option<&'static str> {
    use codes::*;
    let text = match id {
        EXP_TERMINATING_CHAR => {
            "An argument was followed directly by a character that cannot end it. \
             Arguments are separated by spaces or by punctuation such as '[', ',' or '='."
        }
        EXP_WORD => "An unquoted word was required here.",
        EXP_ID => "A namespaced identifier such as `minecraft:stone` was required here.",
        EXP_MESSAGE => "This command needs a message; the rest of the line was empty.",
        EXP_CHAR => "A specific punctuation character was required here.",
        EXP_INTEGER => "An integer was required. Integers may have a leading '+' or '-'.",
        EXP_NUMBER => "A number was required. Numbers may have a sign and a fractional part.",
        EXP_INT_RANGE => {
            "An integer range such as `3`, `1..5`, `..5` or `1..` was required; \
             at least one bound must be present."
        }
        EXP_BOOL => "Either `true` or `false` was required.",
        EXP_BOOL_OR_OPTION => "Either a boolean or one of the listed keywords was required.",
        EXP_POS => {
            "A position component was required: a number, `~` (relative) \
             or `^` (local), each optionally followed by an offset."
        }
        EXP_JSON => "A JSON value was required. Only the rest of the current line is read.",
        EXP_COMMAND => "A command name was required at the start of the line.",
        EXP_BS_DV => "A block needs either block states (`[...]`) or a numeric data value.",
        EXP_BLOCK_STATE => {
            "From 1.19.70 blocks take block states (`[\"key\":value]`) only; \
             numeric data values are no longer accepted."
        }
        EXP_BS_VALUE => "Block state values must be booleans, integers or quoted strings.",
        EXP_EXECUTE_SUBCMD => {
            "Expected an `execute` subcommand: align, anchored, as, at, facing, in, \
             positioned, rotated, run, if or unless."
        }
        EXP_FUNCTION_PATH => "A function path such as `folder/name` was required.",
        EXP_SCB_OP => "Expected a scoreboard operator: +=, -=, *=, /=, %=, =, <, > or ><.",
        EXP_STATE => "Expected `enabled` or `disabled`.",
        EXP_LIST_SEPARATOR => {
            "List elements must be separated by ',' and the list closed by its bracket. \
             The unexpected text up to the next separator was skipped."
        }
        UNCLOSED_STRING => {
            "A quoted string was not closed before the end of the line. \
             Use `\\\"` to put a quote inside a string."
        }
        INCOMPLETE_FLOAT => "A decimal point must be followed by at least one digit.",
        NUMLIKE_WORD => "Words that read as numbers must be quoted to be used as names.",
        NUMLIKE_ID => "Namespaced identifiers cannot read as numbers.",
        ILLEGAL_CHAR_IN_ID => {
            "Namespaced identifiers may only contain lowercase letters, digits, \
             '_', '-', '.' and one ':'."
        }
        MULTIPLE_COLONS_IN_ID => "A namespaced identifier can have only one ':' separating namespace and path.",
        ILLEGAL_CHAR_IN_AXES => "`execute align` axes may only contain 'x', 'y' and 'z'.",
        REPEAT_CHAR_IN_AXES => "`execute align` axes may name each axis at most once.",
        UNKNOWN_COMMAND => {
            "The command does not exist in the configured game version. \
             Check the spelling, or raise the target version."
        }
        INVALID_OPTION => "The keyword is not one of the options this argument accepts.",
        INVALID_SELECTOR_ARG => {
            "The selector option is not recognized. The rest of the line is skipped \
             because the value's shape is unknown."
        }
        INVALID_HASITEM_ARG => "hasitem accepts the keys item, data, quantity, location and slot.",
        INVALID_SELECTOR_TYPE => "Selector variables are @a, @e, @r, @s, @p, @c, @v and @initiator.",
        INVALID_GAMEMODE_ID => "Numeric game modes are 0, 1, 2 and 5.",
        NUMBER_OUT_OF_RANGE => "The number lies outside the bounds this argument allows.",
        IMPOSSIBLE_RANGE => "The start of a range must not be larger than its end.",
        IMPOSSIBLE_RANDOM => "`scoreboard players random` needs min <= max.",
        IMPOSSIBLE_TEST => "`scoreboard players test` needs min <= max.",
        IMPOSSIBLE_SPREAD => "`spreadplayers` max range must be larger than the spread distance.",
        LOCAL_POS_FOR_SELECTOR => "Selector x, y and z accept absolute or `~` coordinates, not `^`.",
        LOCAL_POS_WITH_RELATIVE => "A position cannot mix `~` and `^` components.",
        UNCLOSED_BRACKET => "A bracketed list was not closed before the end of the line.",
        TRAILING_COMMA => "A comma cannot directly precede a closing bracket.",
        TOO_MANY_ARGS => "The command was complete but more text followed it.",
        TOO_MUCH_JSON => "A JSON value was complete but more text followed it on the line.",
        HASITEM_MISSING_ITEM => "Every hasitem object needs an `item` key.",
        WRONG_EXECUTE_END => "An `execute` chain must end with `run`, `if` or `unless`.",
        AT_LEAST_ONE_ELEMENT => "This list cannot be empty.",
        NESTING_TOO_DEEP => "Commands nested with `run` went deeper than the tokenizer allows.",
        INTEGER_OVERFLOW => "Integers must fit in 32 signed bits (-2147483648..=2147483647).",
        NO_PERMISSION => {
            "The command needs operator permission that function files and \
             command blocks do not have."
        }
        DANGEROUS_HASITEM_DATA => "A negative hasitem `data` matches unpredictably; use 0..=32767.",
        BLOCK_DATA => "Numeric block data values are deprecated in favor of block states.",
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: usize, column: usize) -> Position {
        Position::new(line, column)
    }

    // ── Position / Span ─────────────────────────────────────────────────

    #[test]
    fn position_orders_by_line_then_column() {
        assert!(pos(1, 9) < pos(2, 0));
        assert!(pos(3, 1) < pos(3, 2));
        assert_eq!(pos(4, 4), pos(4, 4));
    }

    #[test]
    fn position_display() {
        assert_eq!(pos(12, 3).to_string(), "12.3");
    }

    #[test]
    fn span_display() {
        assert_eq!(Span::new(pos(1, 0), pos(1, 4)).to_string(), "1.0-1.4");
    }

    #[test]
    fn span_empty() {
        let s = Span::empty(pos(2, 7));
        assert!(s.is_empty());
        assert_eq!(s.begin, s.end);
    }

    #[test]
    #[should_panic(expected = "Span end (1.3) < begin (1.5)")]
    fn span_new_inverted_panics() {
        Span::new(pos(1, 5), pos(1, 3));
    }

    // ── LineIndex ────────────────────────────────────────────────────────

    #[test]
    fn line_index_two_lines() {
        let idx = LineIndex::new("ab\ncd", pos(1, 0));
        assert_eq!(idx.line_count(), 2);
        assert_eq!(idx.offset(pos(1, 0)), Some(0));
        assert_eq!(idx.offset(pos(1, 2)), Some(2)); // '\n'
        assert_eq!(idx.offset(pos(2, 0)), Some(3));
        assert_eq!(idx.offset(pos(2, 2)), Some(5)); // EOF
    }

    #[test]
    fn line_index_honors_start_offset() {
        let idx = LineIndex::new("say a\nsay b", pos(10, 4));
        assert_eq!(idx.offset(pos(10, 4)), Some(0));
        assert_eq!(idx.offset(pos(10, 8)), Some(4));
        assert_eq!(idx.offset(pos(11, 0)), Some(6));
        assert_eq!(idx.offset(pos(9, 0)), None);
        assert_eq!(idx.offset(pos(10, 2)), None);
        assert_eq!(idx.position(6), pos(11, 0));
        assert_eq!(idx.position(2), pos(10, 6));
    }

    #[test]
    fn line_index_counts_chars_not_bytes() {
        // '€' is 3 bytes in UTF-8
        let idx = LineIndex::new("€\na", pos(1, 0));
        assert_eq!(idx.offset(pos(2, 0)), Some(2));
        assert_eq!(idx.position(2), pos(2, 0));
    }

    #[test]
    fn line_index_clamps_past_end() {
        let idx = LineIndex::new("hi", pos(1, 0));
        assert_eq!(idx.offset(pos(1, 50)), Some(2));
        assert_eq!(idx.offset(pos(3, 0)), None);
    }

    // ── Severity Display ────────────────────────────────────────────────

    #[test]
    fn severity_display() {
        assert_eq!(format!("{}", Severity::Error), "error");
        assert_eq!(format!("{}", Severity::Warn), "warn");
    }

    // ── Diagnostic ──────────────────────────────────────────────────────

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic::error(codes::TOO_MANY_ARGS, "too many arguments", None);
        assert_eq!(format!("{}", d), "error[MCC1303]: too many arguments");
    }

    #[test]
    fn diagnostic_from_syntax_error_carries_params() {
        let span = Span::new(pos(1, 25), pos(1, 31));
        let d = Diagnostic::from_syntax_error(&SyntaxError::out_of_range(1, 32767), span);
        assert_eq!(d.id, codes::NUMBER_OUT_OF_RANGE);
        assert_eq!(d.severity, Severity::Error);
        assert_eq!(d.located_message(), "1.25-1.31: number not in range: [1, 32767]");
        let ctx = d.context.as_ref().unwrap();
        assert_eq!(ctx["min"], "1");
        assert_eq!(ctx["max"], "32767");
    }

    #[test]
    fn diagnostic_from_parameterless_error_has_no_context() {
        let d = Diagnostic::from_syntax_error(&SyntaxError::TrailingComma, Span::empty(pos(1, 0)));
        assert!(d.context.is_none());
    }

    #[test]
    fn diagnostic_from_warning() {
        let w = Warning::new(
            WarningKind::NoPermission {
                command: "op".into(),
            },
            Span::new(pos(1, 0), pos(1, 2)),
        );
        let d = Diagnostic::from_warning(&w);
        assert_eq!(d.severity, Severity::Warn);
        assert_eq!(d.id, codes::NO_PERMISSION);
        assert!(d.message.contains("\"op\""));
        assert_eq!(d.context.unwrap()["command"], "op");
    }

    #[test]
    fn diagnostic_explain_unknown() {
        let d = Diagnostic::error("UNKNOWN_CODE", "test", None);
        assert!(d.explain().is_none());
    }

    #[test]
    fn all_codes_have_explanations() {
        let all = [
            codes::EXP_TERMINATING_CHAR,
            codes::EXP_WORD,
            codes::EXP_ID,
            codes::EXP_MESSAGE,
            codes::EXP_CHAR,
            codes::EXP_INTEGER,
            codes::EXP_NUMBER,
            codes::EXP_INT_RANGE,
            codes::EXP_BOOL,
            codes::EXP_BOOL_OR_OPTION,
            codes::EXP_POS,
            codes::EXP_JSON,
            codes::EXP_COMMAND,
            codes::EXP_BS_DV,
            codes::EXP_BLOCK_STATE,
            codes::EXP_BS_VALUE,
            codes::EXP_EXECUTE_SUBCMD,
            codes::EXP_FUNCTION_PATH,
            codes::EXP_SCB_OP,
            codes::EXP_STATE,
            codes::EXP_LIST_SEPARATOR,
            codes::UNCLOSED_STRING,
            codes::INCOMPLETE_FLOAT,
            codes::NUMLIKE_WORD,
            codes::NUMLIKE_ID,
            codes::ILLEGAL_CHAR_IN_ID,
            codes::MULTIPLE_COLONS_IN_ID,
            codes::ILLEGAL_CHAR_IN_AXES,
            codes::REPEAT_CHAR_IN_AXES,
            codes::UNKNOWN_COMMAND,
            codes::INVALID_OPTION,
            codes::INVALID_SELECTOR_ARG,
            codes::INVALID_HASITEM_ARG,
            codes::INVALID_SELECTOR_TYPE,
            codes::INVALID_GAMEMODE_ID,
            codes::NUMBER_OUT_OF_RANGE,
            codes::IMPOSSIBLE_RANGE,
            codes::IMPOSSIBLE_RANDOM,
            codes::IMPOSSIBLE_TEST,
            codes::IMPOSSIBLE_SPREAD,
            codes::LOCAL_POS_FOR_SELECTOR,
            codes::LOCAL_POS_WITH_RELATIVE,
            codes::UNCLOSED_BRACKET,
            codes::TRAILING_COMMA,
            codes::TOO_MANY_ARGS,
            codes::TOO_MUCH_JSON,
            codes::HASITEM_MISSING_ITEM,
            codes::WRONG_EXECUTE_END,
            codes::AT_LEAST_ONE_ELEMENT,
            codes::NESTING_TOO_DEEP,
            codes::INTEGER_OVERFLOW,
            codes::NO_PERMISSION,
            codes::DANGEROUS_HASITEM_DATA,
            codes::BLOCK_DATA,
        ];
        for code in &all {
            assert!(
                explain(code).is_some(),
                "diagnostic code {code} has no explain() entry"
            );
        }
    }

    // ── Serde ───────────────────────────────────────────────────────────

    #[test]
    fn diagnostic_serde_roundtrip() {
        let d = Diagnostic::from_syntax_error(
            &SyntaxError::UnknownCommand {
                command: "foo".into(),
            },
            Span::new(pos(3, 0), pos(3, 3)),
        );
        let json = serde_json::to_string(&d).unwrap();
        let d2: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(d, d2);
    }

    #[test]
    fn diagnostic_serde_omits_none_fields() {
        let d = Diagnostic::error(codes::TOO_MANY_ARGS, "test", None);
        let json = serde_json::to_string(&d).unwrap();
        assert!(!json.contains("span"), "None span should be omitted: {json}");
        assert!(
            !json.contains("context"),
            "None context should be omitted: {json}"
        );
    }
}
