//! Command-line option scanning against a caller-supplied spec table.
//!
//! A spec table lists the flags a program wants routed into its
//! configuration tree. [`parse_opts`] pulls every occurrence of those flags
//! (and their values) out of the argument vector, leaving the rest for the
//! program's own parser, and returns them as [`ParsedOpt`] records in the
//! order they appeared. Replaying the records with
//! [`crate::Workspace::apply_opts`] builds the tree.

mod help;
mod scanner;
mod spec;
mod value;

pub use help::render_help;
pub use scanner::{parse_opts, parse_opts_vec};
pub use spec::{ActionKind, ConfigAction, ConfigActionSpec, ConfigCallback, ParsedOpt, ValueHint};
pub use value::{split_target_payload, strip_quotes};
