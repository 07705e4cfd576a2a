//! Layered configuration trees assembled from command-line flags.
//!
//! A program declares which flags feed its configuration in a table of
//! [`ConfigActionSpec`]s. [`parse_opts`] extracts those flags from the
//! argument vector, leaving everything else for the program's own parser,
//! and [`Workspace`] replays them in order onto a [`Tree`]: inline YAML
//! fragments, whole files, whole directories and custom callbacks, each
//! deep-merged at an optional target path.
//!
//! ```rust,no_run
//! use conftree::{ConfigActionSpec, ConfResult, Tree, Workspace, render_help};
//!
//! fn verbose(tree: &mut Tree, _arg: &str) -> ConfResult<()> {
//!     tree.set_path("log.level", "debug").map(|_| ())
//! }
//!
//! const SPECS: &[ConfigActionSpec<'static>] = &[
//!     ConfigActionSpec::set_node("-n", "--node"),
//!     ConfigActionSpec::load_file("-f", "--file"),
//!     ConfigActionSpec::load_dir("-d", "--dir"),
//!     ConfigActionSpec::callback(verbose, "-v", "--verbose", "", "Log at debug level."),
//! ];
//!
//! fn main() -> ConfResult<()> {
//!     let mut tree = Tree::parse("log: {level: info}")?;
//!     let mut args: Vec<String> = std::env::args().collect();
//!     if args.iter().any(|arg| arg == "--help") {
//!         print!("{}", render_help(SPECS));
//!         return Ok(());
//!     }
//!     Workspace::new(&mut tree).apply_args(&mut args, SPECS)?;
//!     // `args` now holds only what the configuration flags did not claim.
//!     Ok(())
//! }
//! ```

mod error;
mod opts;
mod provider;
mod tree;
mod workspace;

pub use error::ConfError;
pub use opts::{
    ActionKind, ConfigAction, ConfigActionSpec, ConfigCallback, ParsedOpt, ValueHint, parse_opts,
    parse_opts_vec, render_help, split_target_payload, strip_quotes,
};
pub use provider::TreeProvider;
pub use tree::{MAX_SEQ_GROWTH, NodeId, NodeKind, PathSegment, Tree, parse_path};
pub use workspace::Workspace;

/// Result alias used throughout the crate.
pub type ConfResult<T> = Result<T, std::sync::Arc<ConfError>>;
