//! Filesystem access for file and directory loading via `cap-std`.
//!
//! Both helpers run with ambient authority: the caller names the paths, and
//! symlinks resolve wherever they point, including outside the directory
//! being listed.

use std::io::Read;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{
    ambient_authority,
    fs_utf8::{Dir, DirEntry, File},
};

use crate::ConfResult;
use crate::error::{dir_error, file_error};

/// Read a configuration file into a string.
///
/// # Errors
///
/// Returns [`crate::ConfError::File`] when the file cannot be opened or read.
pub(super) fn read_file(path: &Utf8Path) -> ConfResult<String> {
    let mut file = File::open_ambient(path, ambient_authority()).map_err(|e| file_error(path, e))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| file_error(path, e))?;
    Ok(contents)
}

/// Whether the entry `name` of `dir` is a regular file once symlinks are
/// resolved.
fn is_regular_file(dir: &Utf8Path, entry: &DirEntry, name: &str) -> ConfResult<bool> {
    let file_type = entry.file_type().map_err(|e| dir_error(dir, e))?;
    if !file_type.is_symlink() {
        return Ok(file_type.is_file());
    }
    let target = dir.join(name);
    let metadata = target.metadata().map_err(|e| file_error(&target, e))?;
    Ok(metadata.is_file())
}

/// List the regular files directly inside `path`, sorted by name.
///
/// Symlinks are followed; subdirectories and anything else are skipped. A
/// dangling symlink is an unreadable entry.
///
/// # Errors
///
/// Returns [`crate::ConfError::Directory`] when the directory cannot be opened
/// or listed, and [`crate::ConfError::File`] when a symlinked entry cannot be
/// resolved.
pub(super) fn sorted_files(path: &Utf8Path) -> ConfResult<Vec<Utf8PathBuf>> {
    let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(|e| dir_error(path, e))?;
    let mut names = Vec::new();
    for item in dir.entries().map_err(|e| dir_error(path, e))? {
        let entry = item.map_err(|e| dir_error(path, e))?;
        let name = entry.file_name().map_err(|e| dir_error(path, e))?;
        if is_regular_file(path, &entry, &name)? {
            names.push(name);
        } else {
            tracing::trace!(dir = %path, entry = %name, "skipping non-file entry");
        }
    }
    names.sort_unstable();
    Ok(names.into_iter().map(|name| path.join(name)).collect())
}
