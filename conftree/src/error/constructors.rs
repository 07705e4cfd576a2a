//! Constructors shared by the tree and workspace modules.

use std::sync::Arc;

use camino::Utf8Path;

use super::ConfError;

impl ConfError {
    /// Build a [`ConfError::Callback`] from any displayable message.
    ///
    /// Intended for use inside user callbacks:
    ///
    /// ```rust
    /// use conftree::{ConfError, ConfResult, Tree};
    ///
    /// fn require_root_map(tree: &mut Tree, _arg: &str) -> ConfResult<()> {
    ///     if tree.keys(tree.root()).is_empty() {
    ///         return Err(ConfError::callback("configuration is empty").into());
    ///     }
    ///     Ok(())
    /// }
    ///
    /// let mut tree = Tree::new();
    /// assert!(require_root_map(&mut tree, "").is_err());
    /// ```
    #[must_use]
    pub fn callback(message: impl Into<String>) -> Self {
        Self::Callback {
            message: message.into(),
        }
    }

    /// Build a [`ConfError::InvalidPath`] for `path`.
    #[must_use]
    pub fn invalid_path(path: &str, message: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.to_owned(),
            message: message.into(),
        }
    }
}

/// Construct a [`ConfError::File`] for a configuration file path.
pub(crate) fn file_error(path: &Utf8Path, source: std::io::Error) -> Arc<ConfError> {
    Arc::new(ConfError::File {
        path: path.to_path_buf(),
        source,
    })
}

/// Construct a [`ConfError::Directory`] for a configuration directory.
pub(crate) fn dir_error(path: &Utf8Path, source: std::io::Error) -> Arc<ConfError> {
    Arc::new(ConfError::Directory {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn parse_error(
    origin: impl Into<String>,
    source: serde_saphyr::Error,
) -> Arc<ConfError> {
    Arc::new(ConfError::Parse {
        origin: origin.into(),
        source,
    })
}
