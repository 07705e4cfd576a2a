//! Spec table entries and parsed option records.

use crate::{ConfResult, Tree};

/// Handler invoked for [`ConfigAction::Callback`] options.
///
/// The handler receives the whole tree and the option's payload (empty when
/// no value was supplied). Capture-free closures coerce to this type.
pub type ConfigCallback = fn(&mut Tree, &str) -> ConfResult<()>;

/// What a recognised flag does to the configuration tree.
#[derive(Clone, Copy, Debug, Default)]
pub enum ConfigAction {
    /// Merge the payload, parsed as YAML, at the target path.
    #[default]
    SetNode,
    /// Merge the contents of the file named by the payload.
    LoadFile,
    /// Merge every file in the directory named by the payload, in name order.
    LoadDir,
    /// Hand the tree and payload to a user function.
    Callback(ConfigCallback),
}

/// Payload-free discriminant of [`ConfigAction`], convenient for comparisons.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ActionKind {
    /// See [`ConfigAction::SetNode`].
    SetNode,
    /// See [`ConfigAction::LoadFile`].
    LoadFile,
    /// See [`ConfigAction::LoadDir`].
    LoadDir,
    /// See [`ConfigAction::Callback`].
    Callback,
}

impl ConfigAction {
    /// Returns the discriminant of this action.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::SetNode => ActionKind::SetNode,
            Self::LoadFile => ActionKind::LoadFile,
            Self::LoadDir => ActionKind::LoadDir,
            Self::Callback(_) => ActionKind::Callback,
        }
    }
}

/// Whether a flag takes a value, derived from its hint string.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueHint {
    /// The flag never consumes a value.
    None,
    /// The next token is consumed when one is available.
    Optional,
    /// The next token is required.
    Mandatory,
}

impl ValueHint {
    /// Classify a hint: empty means no value, `[...]` means optional and any
    /// other text means mandatory.
    ///
    /// ```rust
    /// use conftree::ValueHint;
    ///
    /// assert_eq!(ValueHint::classify(""), ValueHint::None);
    /// assert_eq!(ValueHint::classify("[<level>]"), ValueHint::Optional);
    /// assert_eq!(ValueHint::classify("<file>"), ValueHint::Mandatory);
    /// ```
    #[must_use]
    pub fn classify(hint: &str) -> Self {
        if hint.is_empty() {
            Self::None
        } else if hint.starts_with('[') && hint.ends_with(']') {
            Self::Optional
        } else {
            Self::Mandatory
        }
    }
}

/// One recognised flag in a spec table.
#[derive(Clone, Copy, Debug)]
pub struct ConfigActionSpec<'a> {
    /// Action triggered by the flag.
    pub action: ConfigAction,
    /// Short spelling including its dash, such as `-n`; may be empty.
    pub short_flag: &'a str,
    /// Long spelling including its dashes, such as `--node`; may be empty.
    pub long_flag: &'a str,
    /// Value hint; see [`ValueHint::classify`].
    pub value_hint: &'a str,
    /// Description shown by [`crate::render_help`].
    pub help: &'a str,
}

impl<'a> ConfigActionSpec<'a> {
    /// Flag that merges inline YAML into the tree.
    #[must_use]
    pub const fn set_node(short_flag: &'a str, long_flag: &'a str) -> Self {
        Self {
            action: ConfigAction::SetNode,
            short_flag,
            long_flag,
            value_hint: "[<targetpath>=]<validyaml>",
            help: "Merge explicit YAML code into a node of the configuration. \
                   With no target path the root is used. Sequence indices past \
                   the end grow the sequence; missing keys are created.",
        }
    }

    /// Flag that merges a YAML file into the tree.
    #[must_use]
    pub const fn load_file(short_flag: &'a str, long_flag: &'a str) -> Self {
        Self {
            action: ConfigAction::LoadFile,
            short_flag,
            long_flag,
            value_hint: "[<targetpath>=]<filename>",
            help: "Merge the YAML file into a node of the configuration. \
                   With no target path the root is used.",
        }
    }

    /// Flag that merges every file in a directory into the tree.
    #[must_use]
    pub const fn load_dir(short_flag: &'a str, long_flag: &'a str) -> Self {
        Self {
            action: ConfigAction::LoadDir,
            short_flag,
            long_flag,
            value_hint: "[<targetpath>=]<dirname>",
            help: "Merge every file in the directory into a node of the \
                   configuration, in ascending file name order. With no \
                   target path the root is used.",
        }
    }

    /// Flag that invokes `handler`.
    #[must_use]
    pub const fn callback(
        handler: ConfigCallback,
        short_flag: &'a str,
        long_flag: &'a str,
        value_hint: &'a str,
        help: &'a str,
    ) -> Self {
        Self {
            action: ConfigAction::Callback(handler),
            short_flag,
            long_flag,
            value_hint,
            help,
        }
    }

    /// Returns `true` when `token` is exactly one of this spec's spellings.
    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        !token.is_empty() && (token == self.short_flag || token == self.long_flag)
    }

    /// Classification of [`Self::value_hint`].
    #[must_use]
    pub fn hint(&self) -> ValueHint {
        ValueHint::classify(self.value_hint)
    }
}

/// One recognised flag occurrence, reduced to what the workspace needs.
#[derive(Clone, Debug, Default)]
pub struct ParsedOpt {
    /// Action copied from the matching spec.
    pub action: ConfigAction,
    /// Target path; empty when the value had no `path=` prefix.
    pub target: String,
    /// Value with quoting removed; empty when no value was supplied.
    pub payload: String,
}

impl ParsedOpt {
    /// Returns the discriminant of [`Self::action`].
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        self.action.kind()
    }
}
