//! Directory scanning and file → module path mapping.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RegistrarError, RegistrarResult};

/// Recursively collect files with `extension` under `dir`, sorted by path.
pub fn source_files(dir: &Path, extension: &str) -> RegistrarResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(RegistrarError::NotADirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    walk(dir, extension, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk(dir: &Path, extension: &str, files: &mut Vec<PathBuf>) -> RegistrarResult<()> {
    let entries = fs::read_dir(dir).map_err(|source| RegistrarError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| RegistrarError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if path.is_dir() {
            walk(&path, extension, files)?;
        } else if path.extension().is_some_and(|ext| ext == extension) {
            files.push(path);
        }
    }

    Ok(())
}

/// Map a source file to the module path it defines.
///
/// `base_path` is stripped first (falling back to canonical paths when the
/// plain prefix does not match). `mod.rs` names its directory, a top-level
/// `lib.rs`/`main.rs` names the root, and `root_namespace` is prepended.
pub fn module_path(file: &Path, base_path: &Path, root_namespace: &str) -> String {
    let relative = strip_base(file, base_path);

    let mut segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if let Some(last) = segments.pop() {
        let stem = Path::new(&last)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or(last);
        let is_root_file = segments.is_empty() && (stem == "lib" || stem == "main");
        if stem != "mod" && !is_root_file {
            segments.push(stem);
        }
    }

    let root = root_namespace.trim_end_matches("::");
    std::iter::once(root.to_string())
        .filter(|r| !r.is_empty())
        .chain(segments)
        .collect::<Vec<_>>()
        .join("::")
}

fn strip_base(file: &Path, base_path: &Path) -> PathBuf {
    if let Ok(rel) = file.strip_prefix(base_path) {
        return rel.to_path_buf();
    }
    if let (Ok(file), Ok(base)) = (fs::canonicalize(file), fs::canonicalize(base_path)) {
        if let Ok(rel) = file.strip_prefix(&base) {
            return rel.to_path_buf();
        }
    }
    file.to_path_buf()
}
