//! Primary error enum for option scanning and tree assembly.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning flags or merging configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfError {
    /// A flag that requires a value was not followed by one.
    #[error("missing value for option '{flag}'")]
    MissingValue {
        /// Spelling of the flag as it appeared on the command line.
        flag: String,
    },

    /// A target path could not be parsed.
    #[error("invalid target path '{path}': {message}")]
    InvalidPath {
        /// The offending path expression.
        path: String,
        /// Explanation of what is malformed.
        message: String,
    },

    /// Error reading a configuration file.
    #[error("Configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Error listing a configuration directory.
    #[error("Configuration directory error in '{path}': {source}")]
    Directory {
        /// Directory that could not be listed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A payload or document is not valid YAML.
    #[error("failed to parse {origin}: {source}")]
    Parse {
        /// Where the text came from: a file path or an inline payload.
        origin: String,
        /// Parser diagnostics.
        #[source]
        source: serde_saphyr::Error,
    },

    /// A user callback reported a failure.
    #[error("callback failed: {message}")]
    Callback {
        /// Message supplied by the callback.
        message: String,
    },
}
