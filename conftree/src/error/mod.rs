//! Error types produced while scanning arguments and assembling trees.

mod constructors;
mod types;

pub use types::ConfError;

pub(crate) use constructors::{dir_error, file_error, parse_error};
