/// Block states and the version-dependent block suffix.
mod block;
/// Argument grammars for the command table.
mod commands;
/// Character reader with position tracking.
pub mod cursor;
/// JSON serialization helpers for tokenizer output.
pub mod dump;
/// The `execute` grammars.
mod execute;
/// Line-restricted JSON sub-tokenizer.
pub mod json;
/// Command names, aliases and the version-dispatched rule table.
mod registry;
/// Primitive argument readers.
mod scalar;
/// Token scopes and the bracketed-list combinator.
mod scan;
/// Target selector grammar.
mod selector;
/// Token types.
pub mod token;
/// Line loop and command dispatch.
mod tokenizer;
/// Game versions and version-gated rules.
pub mod version;

pub use tokenizer::MAX_NESTING;
pub(crate) use tokenizer::Tokenizer;
