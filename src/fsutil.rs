//! Filesystem helpers: atomic writes and tolerant reads.

use std::path::Path;

use crate::error::{GuideError, Lookup, Result};

/// Write `contents` to `path` atomically (tmp + rename), creating parent directories.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| GuideError::io("create directory", parent, e))?;
    }

    let tmp_path = path.with_extension("tmp");
    std::fs::write(&tmp_path, contents).map_err(|e| GuideError::io("write", &tmp_path, e))?;
    std::fs::rename(&tmp_path, path).map_err(|e| GuideError::io("replace", path, e))?;
    Ok(())
}

/// Read a UTF-8 file, reporting a missing file as [`Lookup::Missing`].
pub fn read_optional(path: &Path) -> Result<Lookup<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Lookup::Found(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Lookup::Missing {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(GuideError::io("read", path, e)),
    }
}

/// Read a UTF-8 file that must exist.
pub fn read_required(path: &Path, what: &str) -> Result<String> {
    match read_optional(path)? {
        Lookup::Found(text) => Ok(text),
        Lookup::Missing { path } => Err(GuideError::not_found(what, &path)),
    }
}

/// Sorted names of the regular files in `dir` with the given extension.
/// A missing directory yields an empty list.
pub fn list_files(dir: &Path, extension: &str) -> Result<Vec<String>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(GuideError::io("list", dir, e)),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| GuideError::io("list", dir, e))?;
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_file && Path::new(&name).extension().and_then(|e| e.to_str()) == Some(extension) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}
