//! Replays parsed options onto a configuration tree.
//!
//! [`Workspace`] borrows the caller's tree mutably and applies each
//! [`ParsedOpt`] to completion, in order, before looking at the next one, so
//! later options override earlier ones that touch the same path. The first
//! failure stops the replay; whatever earlier options did is kept.
//!
//! # Example
//!
//! ```rust
//! use conftree::{ConfigActionSpec, Tree, Workspace};
//!
//! const SPECS: &[ConfigActionSpec<'static>] = &[ConfigActionSpec::set_node("-n", "--node")];
//!
//! let mut tree = Tree::parse("server: {port: 80, host: localhost}")?;
//! let mut args = vec!["prog", "-n", "server.port=8080", "--verbose"];
//! let mut workspace = Workspace::new(&mut tree);
//! workspace.apply_args(&mut args, SPECS)?;
//!
//! assert_eq!(args, ["prog", "--verbose"]);
//! assert_eq!(
//!     workspace.tree(),
//!     &Tree::parse("server: {port: 8080, host: localhost}")?
//! );
//! # Ok::<_, std::sync::Arc<conftree::ConfError>>(())
//! ```

mod fs;

use camino::Utf8Path;

use crate::opts::{ConfigAction, ConfigActionSpec, ParsedOpt, parse_opts_vec};
use crate::{ConfResult, Tree};

/// Merge engine holding a mutable borrow of the target tree.
#[derive(Debug)]
pub struct Workspace<'t> {
    tree: &'t mut Tree,
}

impl<'t> Workspace<'t> {
    /// Wrap `tree` for mutation.
    #[must_use]
    pub const fn new(tree: &'t mut Tree) -> Self {
        Self { tree }
    }

    /// Read access to the tree being assembled.
    #[must_use]
    pub const fn tree(&self) -> &Tree {
        self.tree
    }

    /// Apply `opts` in order.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error: an invalid target path, a
    /// payload or file that is not valid YAML, an unreadable file or
    /// directory, or whatever a callback reports.
    pub fn apply_opts(&mut self, opts: &[ParsedOpt]) -> ConfResult<()> {
        opts.iter().try_for_each(|opt| self.apply_opt(opt))
    }

    /// Apply a single parsed option.
    ///
    /// # Errors
    ///
    /// See [`Workspace::apply_opts`].
    pub fn apply_opt(&mut self, opt: &ParsedOpt) -> ConfResult<()> {
        tracing::debug!(
            action = ?opt.kind(),
            path = %opt.target,
            payload = %opt.payload,
            "applying configuration option"
        );
        match opt.action {
            ConfigAction::SetNode => self.set_node(&opt.target, &opt.payload),
            ConfigAction::LoadFile => self.load_file(&opt.target, Utf8Path::new(&opt.payload)),
            ConfigAction::LoadDir => self.load_dir(&opt.target, Utf8Path::new(&opt.payload)),
            ConfigAction::Callback(handler) => handler(&mut *self.tree, &opt.payload),
        }
    }

    /// Scan `args` for the flags in `specs`, then apply what was found.
    ///
    /// The tree is not touched when scanning fails. On success `args` holds
    /// only the unrecognised tokens and the number of options applied is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfError::MissingValue`] from the scan, or the first
    /// error reported while applying.
    pub fn apply_args<A: AsRef<str>>(
        &mut self,
        args: &mut Vec<A>,
        specs: &[ConfigActionSpec<'_>],
    ) -> ConfResult<usize> {
        let opts = parse_opts_vec(args, specs)?;
        self.apply_opts(&opts)?;
        Ok(opts.len())
    }

    /// Merge `yaml` at `target`, creating the path as needed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfError::InvalidPath`] or [`crate::ConfError::Parse`].
    pub fn set_node(&mut self, target: &str, yaml: &str) -> ConfResult<()> {
        let fragment = Tree::parse_fragment(yaml)?;
        self.merge_at(target, &fragment)
    }

    /// Merge the YAML document in `path` at `target`.
    ///
    /// A file without content leaves the tree unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfError::File`] when the file cannot be read, as
    /// well as the errors of [`Workspace::set_node`].
    pub fn load_file(&mut self, target: &str, path: &Utf8Path) -> ConfResult<()> {
        let contents = fs::read_file(path)?;
        tracing::debug!(file = %path, path = %target, "merging configuration file");
        match Tree::parse_named(path.as_str(), &contents)? {
            Some(document) => self.merge_at(target, &document),
            None => Ok(()),
        }
    }

    /// Merge every regular file in `path` at `target`, in ascending name
    /// order. An empty directory is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfError::Directory`] when the directory cannot be
    /// listed, as well as the errors of [`Workspace::load_file`].
    pub fn load_dir(&mut self, target: &str, path: &Utf8Path) -> ConfResult<()> {
        let files = fs::sorted_files(path)?;
        tracing::debug!(dir = %path, count = files.len(), "merging configuration directory");
        files
            .iter()
            .try_for_each(|file| self.load_file(target, file))
    }

    fn merge_at(&mut self, target: &str, fragment: &Tree) -> ConfResult<()> {
        let node = self.tree.lookup_or_create(target)?;
        self.tree.merge_with(node, fragment, fragment.root());
        Ok(())
    }
}
