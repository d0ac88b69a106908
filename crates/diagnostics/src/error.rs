//! The closed set of grammar errors.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::codes;

/// A recoverable grammar error.
///
/// Every variant is one error kind; its named fields are the parameters of
/// the kind's message template. The tokenizer never lets one of these escape:
/// each is captured into an error token at the point of failure.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum SyntaxError {
    /// A value ran straight into a non-terminating character.
    #[error("expected a terminating character")]
    ExpTerminatingChar,
    /// An unquoted word was required.
    #[error("expected a word")]
    ExpWord,
    /// A namespaced identifier was required.
    #[error("expected a namespaced identifier")]
    ExpId,
    /// A free-text message was required.
    #[error("expected a message")]
    ExpMessage,
    /// A specific character was required.
    #[error("expected character {expected:?}")]
    ExpChar {
        /// The character that was required.
        expected: char,
    },
    /// An integer was required.
    #[error("expected an integer")]
    ExpInteger,
    /// A number was required.
    #[error("expected a number")]
    ExpNumber,
    /// An integer range was required.
    #[error("expected an integer range")]
    ExpIntRange,
    /// `true` or `false` was required.
    #[error("expected a boolean value")]
    ExpBool,
    /// A boolean or one of `options` was required.
    #[error("expected a boolean or one of {options}")]
    ExpBoolOrOption {
        /// Quoted, comma-separated keyword list.
        options: String,
    },
    /// A position component was required.
    #[error("expected a position")]
    ExpPos,
    /// A JSON value was required.
    #[error("expected a JSON value")]
    ExpJson,
    /// A command name was required.
    #[error("expected a command")]
    ExpCommand,
    /// Block states or a data value were required.
    #[error("expected block states or a data value")]
    ExpBsDv,
    /// Block states were required.
    #[error("expected block states")]
    ExpBlockState,
    /// A block state value must be a boolean, integer, or quoted string.
    #[error("expected a boolean, an integer or a quoted string")]
    ExpBsValue,
    /// An `execute` subcommand was required.
    #[error("expected an execute subcommand")]
    ExpExecuteSubcmd,
    /// A function path was required.
    #[error("expected a function path")]
    ExpFunctionPath,
    /// A scoreboard operation operator was required.
    #[error("expected one of +=, -=, *=, /=, %=, =, <, >, ><")]
    ExpScbOp,
    /// `enabled` or `disabled` was required.
    #[error("expected a state (enabled / disabled)")]
    ExpState,
    /// Text between list elements that is neither `,` nor the closer.
    #[error("expected ',' or {close:?}")]
    ExpListSeparator {
        /// The list's closing delimiter.
        close: char,
    },
    /// A quoted string was not closed before end of line.
    #[error("unclosed string")]
    UnclosedString,
    /// A bracketed list was not closed.
    #[error("unclosed bracket, expected {close:?}")]
    UnclosedBracket {
        /// The missing closing delimiter.
        close: char,
    },
    /// A comma directly before the closing delimiter.
    #[error("trailing comma is not allowed")]
    TrailingComma,
    /// A number outside `[min, max]`.
    #[error("number not in range: {}", range_text(.min, .max))]
    NumberOutOfRange {
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound, or `None` when unbounded.
        max: Option<f64>,
    },
    /// An integer outside the 32-bit signed range.
    #[error("integer overflow")]
    IntegerOverflow,
    /// A `.` without digits after it.
    #[error("incomplete floating point number")]
    IncompleteFloat,
    /// Range start larger than range end.
    #[error("start of integer range is larger than its end")]
    ImpossibleRange,
    /// `scoreboard players random` with min above max.
    #[error("random minimum is larger than maximum")]
    ImpossibleRandom,
    /// `scoreboard players test` with min above max.
    #[error("test minimum is larger than maximum")]
    ImpossibleTest,
    /// `spreadplayers` range not above distance.
    #[error("spread range must be larger than distance")]
    ImpossibleSpread,
    /// An unquoted word that reads as a number.
    #[error("a number-like word must be quoted")]
    NumlikeWord,
    /// A namespaced identifier that reads as a number.
    #[error("a namespaced identifier cannot be number-like")]
    NumlikeId,
    /// A namespaced identifier with characters outside `[0-9a-z_.:-]`.
    #[error("namespaced identifiers may only contain a-z, 0-9, _, -, . and :")]
    IllegalCharInId,
    /// `align` axes other than `x`, `y`, `z`.
    #[error("align axes may only contain 'x', 'y' and 'z'")]
    IllegalCharInAxes,
    /// `align` axes repeating an axis.
    #[error("align axes repeat 'x', 'y' or 'z'")]
    RepeatCharInAxes,
    /// More than one `:` in a namespaced identifier.
    #[error("more than one colon in namespaced identifier")]
    MultipleColonsInId,
    /// A command unknown at the configured version.
    #[error("unknown command: {command:?}")]
    UnknownCommand {
        /// The canonical command name.
        command: String,
    },
    /// Arguments left over after the command grammar finished.
    #[error("too many arguments")]
    TooManyArgs,
    /// Characters after a complete JSON value.
    #[error("characters after end of JSON")]
    TooMuchJson,
    /// A keyword argument outside its allowed set.
    #[error("invalid option: {option:?}; expected {allowed}")]
    InvalidOption {
        /// The word that was read.
        option: String,
        /// Quoted, comma-separated keyword list.
        allowed: String,
    },
    /// An unrecognized selector option.
    #[error("invalid selector argument: {arg:?}")]
    InvalidSelectorArg {
        /// The option name that was read.
        arg: String,
    },
    /// An unrecognized `hasitem` key.
    #[error("invalid hasitem argument: {arg:?}")]
    InvalidHasitemArg {
        /// The key that was read.
        arg: String,
    },
    /// A `hasitem` object without `item`.
    #[error("\"item\" argument is required for hasitem")]
    HasitemMissingItem,
    /// An unrecognized selector variable.
    #[error("invalid selector type: {var:?}")]
    InvalidSelectorType {
        /// The variable that was read after `@`.
        var: String,
    },
    /// A numeric game mode outside `0 1 2 5`.
    #[error("invalid game mode id")]
    InvalidGamemodeId,
    /// `^` used for selector `x`/`y`/`z`.
    #[error("^ positions can not be used for selector arguments 'x', 'y' and 'z'")]
    LocalPosForSelector,
    /// `~` and `^` in the same position.
    #[error("~ and ^ can not be used together in a position")]
    LocalPosWithRelative,
    /// An `execute` chain not ending in `run`, `if`, or `unless`.
    #[error("\"execute\" must end with \"run\", \"if\" or \"unless\"")]
    WrongExecuteEnd,
    /// An empty list where at least one element is required.
    #[error("at least one element is required")]
    AtLeastOneElement,
    /// Nested commands beyond the recursion limit.
    #[error("commands nested more than {limit} levels deep")]
    NestingTooDeep {
        /// The configured nesting limit.
        limit: usize,
    },
}

fn range_text(min: &f64, max: &Option<f64>) -> String {
    match max {
        Some(max) => format!("[{min}, {max}]"),
        None => format!("[{min}, +inf)"),
    }
}

impl SyntaxError {
    /// Shorthand for a bounded [`SyntaxError::NumberOutOfRange`].
    pub fn out_of_range(min: impl Into<f64>, max: impl Into<f64>) -> Self {
        Self::NumberOutOfRange {
            min: min.into(),
            max: Some(max.into()),
        }
    }

    /// Shorthand for a [`SyntaxError::NumberOutOfRange`] with no upper bound.
    pub fn below(min: impl Into<f64>) -> Self {
        Self::NumberOutOfRange {
            min: min.into(),
            max: None,
        }
    }

    /// The stable diagnostic code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ExpTerminatingChar => codes::EXP_TERMINATING_CHAR,
            Self::ExpWord => codes::EXP_WORD,
            Self::ExpId => codes::EXP_ID,
            Self::ExpMessage => codes::EXP_MESSAGE,
            Self::ExpChar { .. } => codes::EXP_CHAR,
            Self::ExpInteger => codes::EXP_INTEGER,
            Self::ExpNumber => codes::EXP_NUMBER,
            Self::ExpIntRange => codes::EXP_INT_RANGE,
            Self::ExpBool => codes::EXP_BOOL,
            Self::ExpBoolOrOption { .. } => codes::EXP_BOOL_OR_OPTION,
            Self::ExpPos => codes::EXP_POS,
            Self::ExpJson => codes::EXP_JSON,
            Self::ExpCommand => codes::EXP_COMMAND,
            Self::ExpBsDv => codes::EXP_BS_DV,
            Self::ExpBlockState => codes::EXP_BLOCK_STATE,
            Self::ExpBsValue => codes::EXP_BS_VALUE,
            Self::ExpExecuteSubcmd => codes::EXP_EXECUTE_SUBCMD,
            Self::ExpFunctionPath => codes::EXP_FUNCTION_PATH,
            Self::ExpScbOp => codes::EXP_SCB_OP,
            Self::ExpState => codes::EXP_STATE,
            Self::ExpListSeparator { .. } => codes::EXP_LIST_SEPARATOR,
            Self::UnclosedString => codes::UNCLOSED_STRING,
            Self::UnclosedBracket { .. } => codes::UNCLOSED_BRACKET,
            Self::TrailingComma => codes::TRAILING_COMMA,
            Self::NumberOutOfRange { .. } => codes::NUMBER_OUT_OF_RANGE,
            Self::IntegerOverflow => codes::INTEGER_OVERFLOW,
            Self::IncompleteFloat => codes::INCOMPLETE_FLOAT,
            Self::ImpossibleRange => codes::IMPOSSIBLE_RANGE,
            Self::ImpossibleRandom => codes::IMPOSSIBLE_RANDOM,
            Self::ImpossibleTest => codes::IMPOSSIBLE_TEST,
            Self::ImpossibleSpread => codes::IMPOSSIBLE_SPREAD,
            Self::NumlikeWord => codes::NUMLIKE_WORD,
            Self::NumlikeId => codes::NUMLIKE_ID,
            Self::IllegalCharInId => codes::ILLEGAL_CHAR_IN_ID,
            Self::IllegalCharInAxes => codes::ILLEGAL_CHAR_IN_AXES,
            Self::RepeatCharInAxes => codes::REPEAT_CHAR_IN_AXES,
            Self::MultipleColonsInId => codes::MULTIPLE_COLONS_IN_ID,
            Self::UnknownCommand { .. } => codes::UNKNOWN_COMMAND,
            Self::TooManyArgs => codes::TOO_MANY_ARGS,
            Self::TooMuchJson => codes::TOO_MUCH_JSON,
            Self::InvalidOption { .. } => codes::INVALID_OPTION,
            Self::InvalidSelectorArg { .. } => codes::INVALID_SELECTOR_ARG,
            Self::InvalidHasitemArg { .. } => codes::INVALID_HASITEM_ARG,
            Self::HasitemMissingItem => codes::HASITEM_MISSING_ITEM,
            Self::InvalidSelectorType { .. } => codes::INVALID_SELECTOR_TYPE,
            Self::InvalidGamemodeId => codes::INVALID_GAMEMODE_ID,
            Self::LocalPosForSelector => codes::LOCAL_POS_FOR_SELECTOR,
            Self::LocalPosWithRelative => codes::LOCAL_POS_WITH_RELATIVE,
            Self::WrongExecuteEnd => codes::WRONG_EXECUTE_END,
            Self::AtLeastOneElement => codes::AT_LEAST_ONE_ELEMENT,
            Self::NestingTooDeep { .. } => codes::NESTING_TOO_DEEP,
        }
    }

    /// The named template parameters of this error, in key order.
    ///
    /// Empty for parameterless kinds.
    pub fn params(&self) -> BTreeMap<String, String> {
        let pairs: Vec<(&str, String)> = match self {
            Self::ExpChar { expected } => vec![("char", expected.to_string())],
            Self::ExpBoolOrOption { options } => vec![("options", options.clone())],
            Self::ExpListSeparator { close } | Self::UnclosedBracket { close } => {
                vec![("close", close.to_string())]
            }
            Self::NumberOutOfRange { min, max } => vec![
                ("min", min.to_string()),
                ("max", max.map_or_else(|| "+inf".to_owned(), |m| m.to_string())),
            ],
            Self::UnknownCommand { command } => vec![("command", command.clone())],
            Self::InvalidOption { option, allowed } => {
                vec![("option", option.clone()), ("allowed", allowed.clone())]
            }
            Self::InvalidSelectorArg { arg } | Self::InvalidHasitemArg { arg } => {
                vec![("arg", arg.clone())]
            }
            Self::InvalidSelectorType { var } => vec![("var", var.clone())],
            Self::NestingTooDeep { limit } => vec![("limit", limit.to_string())],
            _ => Vec::new(),
        };
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v))
            .collect()
    }
}

/// Quote and join keywords the way option errors list them: `'a', 'b'`.
pub fn quote_options(options: &[&str]) -> String {
    options
        .iter()
        .map(|o| format!("'{o}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
