//! Diagnostic ID constants.
//!
//! Errors live in the `MCC1xxx` range, warnings in `MCC2xxx`. IDs are stable:
//! new kinds get new numbers and retired numbers are never reused.

// ── Malformed primitives ────────────────────────────────────────────────

/// A value was not followed by a terminating character.
pub const EXP_TERMINATING_CHAR: &str = "MCC1001";
/// An unquoted word was required.
pub const EXP_WORD: &str = "MCC1002";
/// A namespaced identifier was required.
pub const EXP_ID: &str = "MCC1003";
/// A free-text message was required.
pub const EXP_MESSAGE: &str = "MCC1004";
/// A specific punctuation character was required.
pub const EXP_CHAR: &str = "MCC1005";
/// An integer was required.
pub const EXP_INTEGER: &str = "MCC1006";
/// A number was required.
pub const EXP_NUMBER: &str = "MCC1007";
/// An integer range was required.
pub const EXP_INT_RANGE: &str = "MCC1008";
/// `true` or `false` was required.
pub const EXP_BOOL: &str = "MCC1009";
/// A boolean or one of a fixed set of keywords was required.
pub const EXP_BOOL_OR_OPTION: &str = "MCC1010";
/// A position component was required.
pub const EXP_POS: &str = "MCC1011";
/// A JSON value was required.
pub const EXP_JSON: &str = "MCC1012";
/// A command name was required.
pub const EXP_COMMAND: &str = "MCC1013";
/// Block states or a block data value were required.
pub const EXP_BS_DV: &str = "MCC1014";
/// Block states were required.
pub const EXP_BLOCK_STATE: &str = "MCC1015";
/// A block state value had the wrong shape.
pub const EXP_BS_VALUE: &str = "MCC1016";
/// An `execute` subcommand was required.
pub const EXP_EXECUTE_SUBCMD: &str = "MCC1017";
/// A function path was required.
pub const EXP_FUNCTION_PATH: &str = "MCC1018";
/// A scoreboard operator was required.
pub const EXP_SCB_OP: &str = "MCC1019";
/// `enabled` or `disabled` was required.
pub const EXP_STATE: &str = "MCC1020";
/// Unexpected text between list elements.
pub const EXP_LIST_SEPARATOR: &str = "MCC1021";
/// A quoted string reached end of line.
pub const UNCLOSED_STRING: &str = "MCC1022";
/// A floating point number ended at its decimal point.
pub const INCOMPLETE_FLOAT: &str = "MCC1023";
/// A word looked like a number.
pub const NUMLIKE_WORD: &str = "MCC1024";
/// A namespaced identifier looked like a number.
pub const NUMLIKE_ID: &str = "MCC1025";
/// A namespaced identifier contained an illegal character.
pub const ILLEGAL_CHAR_IN_ID: &str = "MCC1026";
/// A namespaced identifier contained more than one colon.
pub const MULTIPLE_COLONS_IN_ID: &str = "MCC1027";
/// `align` axes contained something other than `x`, `y`, `z`.
pub const ILLEGAL_CHAR_IN_AXES: &str = "MCC1028";
/// `align` axes repeated an axis.
pub const REPEAT_CHAR_IN_AXES: &str = "MCC1029";

// ── Unknown keywords ────────────────────────────────────────────────────

/// The command name is not known at the configured version.
pub const UNKNOWN_COMMAND: &str = "MCC1101";
/// A keyword argument was not in its allowed set.
pub const INVALID_OPTION: &str = "MCC1102";
/// A selector option name was not recognized.
pub const INVALID_SELECTOR_ARG: &str = "MCC1103";
/// A `hasitem` key was not recognized.
pub const INVALID_HASITEM_ARG: &str = "MCC1104";
/// The selector variable after `@` was not recognized.
pub const INVALID_SELECTOR_TYPE: &str = "MCC1105";
/// A numeric game mode was not one of the known IDs.
pub const INVALID_GAMEMODE_ID: &str = "MCC1106";

// ── Range violations ────────────────────────────────────────────────────

/// A number was outside its allowed bounds.
pub const NUMBER_OUT_OF_RANGE: &str = "MCC1201";
/// The start of a range was larger than its end.
pub const IMPOSSIBLE_RANGE: &str = "MCC1202";
/// `scoreboard players random` minimum exceeded maximum.
pub const IMPOSSIBLE_RANDOM: &str = "MCC1203";
/// `scoreboard players test` minimum exceeded maximum.
pub const IMPOSSIBLE_TEST: &str = "MCC1204";
/// `spreadplayers` range was not larger than its distance.
pub const IMPOSSIBLE_SPREAD: &str = "MCC1205";
/// A `^` position component was used in a selector.
pub const LOCAL_POS_FOR_SELECTOR: &str = "MCC1206";
/// `~` and `^` components were mixed in one position.
pub const LOCAL_POS_WITH_RELATIVE: &str = "MCC1207";

// ── Structural mismatches ───────────────────────────────────────────────

/// A bracketed list was never closed.
pub const UNCLOSED_BRACKET: &str = "MCC1301";
/// A comma directly preceded a closing bracket.
pub const TRAILING_COMMA: &str = "MCC1302";
/// Input remained after the last argument of a command.
pub const TOO_MANY_ARGS: &str = "MCC1303";
/// Input remained after a complete JSON value.
pub const TOO_MUCH_JSON: &str = "MCC1304";
/// A `hasitem` object had no `item` key.
pub const HASITEM_MISSING_ITEM: &str = "MCC1305";
/// An `execute` chain did not end in `run`, `if`, or `unless`.
pub const WRONG_EXECUTE_END: &str = "MCC1306";
/// A non-empty list was required.
pub const AT_LEAST_ONE_ELEMENT: &str = "MCC1307";
/// Nested commands exceeded the recursion limit.
pub const NESTING_TOO_DEEP: &str = "MCC1308";

// ── Overflow ────────────────────────────────────────────────────────────

/// An integer did not fit in 32 signed bits.
pub const INTEGER_OVERFLOW: &str = "MCC1401";

// ── Warnings ────────────────────────────────────────────────────────────

/// The command needs a permission level function files do not have.
pub const NO_PERMISSION: &str = "MCC2001";
/// A negative `hasitem` data value.
pub const DANGEROUS_HASITEM_DATA: &str = "MCC2002";
/// A numeric block data value instead of block states.
pub const BLOCK_DATA: &str = "MCC2003";
