use crate::fs::FileSystem;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};

pub const SOURCE_EXTENSIONS: &[&str] = &["vue", "ts"];

const ROOT_INDEX: &str = "index.ts";

/// Recursively lists source files under `dir`, skipping `root`'s own `index.ts`.
///
/// Directories that cannot be read contribute nothing and symlinks are not
/// followed. Order follows the file system and is not guaranteed.
pub fn walk_source_files(fs: &dyn FileSystem, dir: &Path, root: &Path) -> Vec<PathBuf> {
    let entries = match fs.read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "Skipping unreadable directory");
            return Vec::new();
        }
    };

    let root_index = root.join(ROOT_INDEX);
    let mut out = Vec::new();
    for entry in entries {
        if entry.is_dir() {
            out.extend(walk_source_files(fs, entry.path(), root));
        } else if entry.is_file() {
            if !has_source_extension(entry.path()) {
                trace!(path = %entry.path().display(), "Ignoring non-source file");
                continue;
            }
            if entry.path() == root_index {
                continue;
            }
            out.push(entry.path);
        }
    }
    out
}

/// Files directly inside `dir` with the given extension
pub fn list_files(fs: &dyn FileSystem, dir: &Path, extension: &str) -> Vec<PathBuf> {
    match fs.read_dir(dir) {
        Ok(entries) => entries
            .into_iter()
            .filter(|e| e.is_file())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some(extension))
            .map(|e| e.path)
            .collect(),
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "Skipping unreadable directory");
            Vec::new()
        }
    }
}

/// Names of the directories directly inside `dir`, sorted
pub fn list_subdirs(fs: &dyn FileSystem, dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = match fs.read_dir(dir) {
        Ok(entries) => entries
            .into_iter()
            .filter(|e| e.is_dir())
            .map(|e| e.name)
            .collect(),
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "Skipping unreadable directory");
            Vec::new()
        }
    };
    names.sort();
    names
}

/// `path` relative to `base`, joined with `/`
pub fn relative_posix(base: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();
    (!parts.is_empty()).then(|| parts.join("/"))
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}
