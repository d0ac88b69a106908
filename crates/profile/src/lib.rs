//! Tokenizer profiles: the game version to reproduce, where the input starts,
//! and which warnings to hide.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or validating a profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// JSON deserialization failed.
    #[error("invalid profile JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A field value is out of its valid range.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// The name of the field that failed validation.
        field: String,
        /// A human-readable explanation of why the field value is invalid.
        reason: String,
    },
}

/// A named set of tokenizer settings, usually one per project or pack.
///
/// Every setting except the identifiers is optional; an absent setting falls
/// back to the tool's default (latest known grammar, line 1, column 0, no
/// suppressed warnings). Explicit command-line flags override the profile.
///
/// # Example
/// ```
/// let profile = mccmd_profile::Profile {
///     id: "survival-pack".into(),
///     schema_version: "1.0.0".into(),
///     game_version: Some("1.19.70".into()),
///     start_line: None,
///     start_column: None,
///     suppress_warnings: Some(vec!["MCC2003".into()]),
/// };
/// assert!(profile.suppresses("MCC2003"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// Unique profile identifier (e.g., `"survival-pack"`).
    pub id: String,
    /// Profile schema version for forward compatibility (e.g., `"1.0.0"`).
    pub schema_version: String,
    /// Game version whose grammar is reproduced, as `major.minor.patch`.
    pub game_version: Option<String>,
    /// Line number of the first input line (1-based).
    pub start_line: Option<usize>,
    /// Column of the first input character (0-based).
    pub start_column: Option<usize>,
    /// Warning codes (`MCC2xxx`) to leave out of reports.
    pub suppress_warnings: Option<Vec<String>>,
}

impl Profile {
    /// True if warnings with `code` should be hidden.
    pub fn suppresses(&self, code: &str) -> bool {
        self.suppress_warnings
            .as_deref()
            .is_some_and(|codes| codes.iter().any(|c| c == code))
    }
}

/// True if `s` is three dot-separated unsigned integers.
fn is_version_triple(s: &str) -> bool {
    let parts: Vec<&str> = s.split('.').collect();
    parts.len() == 3 && parts.iter().all(|p| p.parse::<u32>().is_ok())
}

/// Load and validate a [`Profile`] from a JSON string.
///
/// The `id` and `schema_version` fields are required and must be present in
/// the JSON; deserialization fails if either is missing.
///
/// Performs structural validation after deserialization:
/// - `id` and `schema_version` must be non-empty
/// - `game_version` must be `major.minor.patch` (if present)
/// - `start_line` must be >= 1 (if present)
/// - every `suppress_warnings` entry must be a warning code `MCC2xxx`
///
/// Whether `game_version` is supported by the grammar is left to the caller.
pub fn load_profile_from_str(s: &str) -> Result<Profile, ProfileError> {
    let profile: Profile = serde_json::from_str(s)?;

    // -- Required string field validation --
    if profile.id.trim().is_empty() {
        return Err(ProfileError::InvalidField {
            field: "id".into(),
            reason: "must not be empty".into(),
        });
    }
    if profile.schema_version.trim().is_empty() {
        return Err(ProfileError::InvalidField {
            field: "schema_version".into(),
            reason: "must not be empty".into(),
        });
    }

    // -- Version validation --
    if let Some(ref version) = profile.game_version
        && !is_version_triple(version)
    {
        return Err(ProfileError::InvalidField {
            field: "game_version".into(),
            reason: format!("{version:?} is not major.minor.patch"),
        });
    }

    // -- Start position validation --
    if profile.start_line == Some(0) {
        return Err(ProfileError::InvalidField {
            field: "start_line".into(),
            reason: "must be >= 1".into(),
        });
    }

    // -- Suppression list validation --
    if let Some(ref codes) = profile.suppress_warnings {
        for code in codes {
            let well_formed = code.len() == 7
                && code.starts_with("MCC2")
                && code[3..].chars().all(|c| c.is_ascii_digit());
            if !well_formed {
                return Err(ProfileError::InvalidField {
                    field: "suppress_warnings".into(),
                    reason: format!("{code:?} is not a warning code (MCC2xxx)"),
                });
            }
        }
    }

    Ok(profile)
}
