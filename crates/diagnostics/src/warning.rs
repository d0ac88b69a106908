//! Non-fatal findings kept apart from the token stream.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Span, codes};

/// What a [`Warning`] flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum WarningKind {
    /// The command is not usable from function files.
    NoPermission {
        /// The command name as it was typed.
        command: String,
    },
    /// `hasitem` with a negative `data` value.
    DangerousHasitemData,
    /// A block given by numeric data value instead of block states.
    BlockData,
}

impl WarningKind {
    /// The stable diagnostic code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoPermission { .. } => codes::NO_PERMISSION,
            Self::DangerousHasitemData => codes::DANGEROUS_HASITEM_DATA,
            Self::BlockData => codes::BLOCK_DATA,
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPermission { command } => write!(
                f,
                "\"{command}\" requires a higher permission level than function files have"
            ),
            Self::DangerousHasitemData => write!(
                f,
                "negative hasitem data matches every data value and is unreliable"
            ),
            Self::BlockData => write!(
                f,
                "block data values are deprecated; use block states instead"
            ),
        }
    }
}

/// A warning and the source range it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// What was flagged.
    pub kind: WarningKind,
    /// Where.
    pub span: Span,
}

impl Warning {
    /// Create a warning.
    pub fn new(kind: WarningKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.span, self.kind)
    }
}
