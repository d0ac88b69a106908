use std::fmt;

use mccmd_diagnostics::{Span, SyntaxError};
use serde::Serialize;

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// A `#` comment line.
    Comment,
    /// The command keyword.
    Command,
    /// A keyword argument or option name.
    Option,
    /// A number or number range.
    Number,
    /// A word, quoted string, identifier, or free text.
    String,
    /// `true` or `false`.
    Boolean,
    /// A target selector or player name.
    Selector,
    /// A scoreboard objective name.
    Scoreboard,
    /// An entity tag.
    Tag,
    /// A coordinate or rotation component.
    Position,
    /// A span that failed to parse.
    Error,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Comment => "comment",
            Self::Command => "command",
            Self::Option => "option",
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Selector => "selector",
            Self::Scoreboard => "scoreboard",
            Self::Tag => "tag",
            Self::Position => "position",
            Self::Error => "error",
        };
        f.pad(name)
    }
}

/// Parsed payload of a token.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenValue {
    /// No payload.
    #[default]
    None,
    /// A parsed numeric value.
    Number(f64),
    /// A parsed boolean.
    Boolean(bool),
    /// The canonical command name, after alias resolution.
    Command(String),
    /// Why this token is an error.
    Error(SyntaxError),
}

/// Renders the payload alone; [`TokenValue::None`] renders as nothing.
impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Command(name) => f.write_str(name),
            Self::Error(err) => write!(f, "{err}"),
        }
    }
}

/// A classified, positioned piece of source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// Classification.
    pub kind: TokenKind,
    /// Kind-dependent payload.
    pub value: TokenValue,
    /// Source range in the caller's frame.
    pub span: Span,
}

impl Token {
    /// The error carried by an error token.
    pub fn error(&self) -> Option<&SyntaxError> {
        match &self.value {
            TokenValue::Error(e) => Some(e),
            _ => None,
        }
    }

    /// True for [`TokenKind::Error`] tokens.
    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }
}

/// `{begin}-{end} {kind} {value}`, or `{begin}-{end}: {message}` for error
/// tokens.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            TokenValue::Error(err) => write!(f, "{}: {err}", self.span),
            TokenValue::None => write!(f, "{} {}", self.span, self.kind),
            value => write!(f, "{} {} {value}", self.span, self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use mccmd_diagnostics::Position;

    use super::*;

    fn token(kind: TokenKind, value: TokenValue) -> Token {
        Token {
            kind,
            value,
            span: Span::new(Position::new(1, 0), Position::new(1, 3)),
        }
    }

    #[test]
    fn display_forms() {
        assert_eq!(
            token(TokenKind::Command, TokenValue::Command("teleport".into())).to_string(),
            "1.0-1.3 command teleport"
        );
        assert_eq!(token(TokenKind::Selector, TokenValue::None).to_string(), "1.0-1.3 selector");
        assert_eq!(
            token(TokenKind::Number, TokenValue::Number(2.5)).to_string(),
            "1.0-1.3 number 2.5"
        );
        assert_eq!(
            token(TokenKind::Error, TokenValue::Error(SyntaxError::TooManyArgs)).to_string(),
            format!("1.0-1.3: {}", SyntaxError::TooManyArgs)
        );
    }

    #[test]
    fn kind_pads() {
        assert_eq!(format!("{:<8}|", TokenKind::Tag), "tag     |");
    }
}
