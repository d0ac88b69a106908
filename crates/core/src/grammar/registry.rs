//! The version-dispatched rule table, built once and read-only afterwards.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use super::scan::Parse;
use super::tokenizer::Tokenizer;
use super::version::{Version, Versioned};
use super::{block, commands, execute, selector};

/// A grammar function for one command or leaf rule.
pub(crate) type Rule = fn(&mut Tokenizer) -> Parse;

/// Shorthands and their canonical command names.
const ALIASES: &[(&str, &str)] = &[
    ("?", "help"),
    ("connect", "wsserver"),
    ("daylock", "alwaysday"),
    ("msg", "tell"),
    ("w", "tell"),
    ("tp", "teleport"),
    ("wb", "worldbuilder"),
];

/// Commands function files lack the permission level to run.
pub(crate) const RESTRICTED: &[&str] = &["deop", "op", "setmaxplayers", "whitelist", "save", "wsserver"];

/// Resolve an alias to its canonical command name.
pub(crate) fn canonical_name(typed: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == typed)
        .map_or(typed, |&(_, name)| name)
}

pub(crate) struct Grammar {
    commands: HashMap<&'static str, Versioned<Rule>>,
    /// Block data value or block states after a block id.
    pub(crate) block_suffix: Versioned<Rule>,
    /// Option names accepted inside `@x[...]`.
    pub(crate) selector_options: Versioned<&'static [&'static str]>,
}

pub(crate) static GRAMMAR: LazyLock<Grammar> = LazyLock::new(Grammar::build);

impl Grammar {
    fn build() -> Self {
        let mut commands: HashMap<&'static str, Versioned<Rule>> = commands::TABLE
            .iter()
            .map(|&(name, rule)| (name, Versioned::always(rule)))
            .collect();
        commands.insert(
            "execute",
            Versioned::always(execute::legacy as Rule).variation(Version::V1_19_50, execute::chain),
        );
        commands.insert(
            "inputpermission",
            Versioned::since(Version::V1_19_80, commands::inputpermission as Rule),
        );
        Self {
            commands,
            block_suffix: Versioned::always(block::data_or_states as Rule)
                .variation(Version::V1_19_70, block::states_only),
            selector_options: Versioned::always(selector::BASE_OPTIONS)
                .variation(Version::V1_19_80, selector::OPTIONS_1_19_80),
        }
    }

    /// The grammar for `name` at `version`, if the command exists there.
    pub(crate) fn command(&self, name: &str, version: Version) -> Option<Rule> {
        self.commands.get(name)?.resolve(version).copied()
    }

    /// Every threshold used by any registration.
    pub(crate) fn versions(&self) -> BTreeSet<Version> {
        self.commands
            .values()
            .flat_map(Versioned::thresholds)
            .chain(self.block_suffix.thresholds())
            .chain(self.selector_options.thresholds())
            .collect()
    }
}
