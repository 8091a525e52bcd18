//! Path checks for target files.
//!
//! Target paths are always relative to the project root. A target that is
//! absolute, contains a NUL byte, or climbs above the root with `..` is
//! rejected before any file is opened.

use crate::error::{EngineError, Result};
use std::path::{Component, Path, PathBuf};

/// Quick lexical check that `path` stays inside whatever root it is joined to.
///
/// Doesn't touch the filesystem.
#[must_use]
pub fn is_path_safe(path: &Path) -> bool {
    if path.to_string_lossy().contains('\0') {
        return false;
    }

    let mut depth: isize = 0;
    for component in path.components() {
        match component {
            Component::ParentDir => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            Component::Normal(_) => depth += 1,
            Component::RootDir | Component::Prefix(_) => return false,
            Component::CurDir => {}
        }
    }

    true
}

/// Join a relative target path onto `root`.
///
/// # Errors
/// Returns `EngineError::UnsafePath` when `relative` is absolute, contains a
/// NUL byte, or escapes `root`.
pub fn resolve_target(root: &Path, relative: &Path) -> Result<PathBuf> {
    if !is_path_safe(relative) {
        return Err(EngineError::UnsafePath(relative.display().to_string()));
    }
    Ok(root.join(relative))
}

/// Project root used when none is given explicitly.
///
/// The release scripts live in `<root>/scripts`, so running from inside that
/// directory resolves to its parent. Anywhere else, `cwd` is the root.
#[must_use]
pub fn default_project_root(cwd: &Path) -> PathBuf {
    match (cwd.file_name(), cwd.parent()) {
        (Some(name), Some(parent)) if name == "scripts" => parent.to_path_buf(),
        _ => cwd.to_path_buf(),
    }
}
