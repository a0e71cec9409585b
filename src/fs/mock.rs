use super::{DirEntry, FileSystem, FileType};
use anyhow::{anyhow, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone)]
pub struct MockEntry {
    pub content: Option<String>,
    pub file_type: FileType,
}

/// In-memory file system. Relative paths are resolved against `root`.
pub struct MockFileSystem {
    files: RwLock<HashMap<PathBuf, MockEntry>>,
    denied: RwLock<HashSet<PathBuf>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            denied: RwLock::new(HashSet::new()),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.files_mut();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut files, parent);
        }

        files.insert(
            path,
            MockEntry {
                content: Some(content.to_string()),
                file_type: FileType::File,
            },
        );
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.files_mut();
        Self::ensure_parents(&mut files, &path);
    }

    /// Makes `read_dir` and `read_to_string` fail for this path, as a
    /// permission error would.
    pub fn deny(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        self.denied
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path);
    }

    /// Every file path currently stored, sorted.
    pub fn file_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .files()
            .iter()
            .filter(|(_, e)| e.file_type == FileType::File)
            .map(|(p, _)| p.clone())
            .collect();
        paths.sort();
        paths
    }

    fn files(&self) -> RwLockReadGuard<'_, HashMap<PathBuf, MockEntry>> {
        self.files.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn files_mut(&self) -> RwLockWriteGuard<'_, HashMap<PathBuf, MockEntry>> {
        self.files.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn ensure_parents(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            files.entry(current.clone()).or_insert(MockEntry {
                content: None,
                file_type: FileType::Directory,
            });
        }
    }

    fn is_denied(&self, path: &Path) -> bool {
        self.denied
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(path)
    }

    fn kind_of(&self, path: &Path) -> Option<FileType> {
        let path = self.normalize_path(path);
        self.files().get(&path).map(|e| e.file_type)
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.kind_of(path).is_some()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.kind_of(path) == Some(FileType::Directory)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.kind_of(path) == Some(FileType::File)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = self.normalize_path(path);
        if self.is_denied(&path) {
            return Err(anyhow!("Permission denied: {:?}", path));
        }
        let files = self.files();
        let entry = files
            .get(&path)
            .ok_or_else(|| anyhow!("File not found: {:?}", path))?;

        entry
            .content
            .clone()
            .ok_or_else(|| anyhow!("Not a file: {:?}", path))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let path = self.normalize_path(path);

        if self.is_denied(&path) {
            return Err(anyhow!("Permission denied: {:?}", path));
        }

        let files = self.files();
        match files.get(&path) {
            Some(entry) if entry.file_type == FileType::Directory => {}
            Some(_) => return Err(anyhow!("Not a directory: {:?}", path)),
            None => return Err(anyhow!("Directory not found: {:?}", path)),
        }

        let mut entries = Vec::new();
        for (file_path, entry) in files.iter() {
            if file_path.parent() == Some(path.as_path()) {
                let name = file_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();

                entries.push(DirEntry {
                    path: file_path.clone(),
                    name,
                    file_type: entry.file_type,
                });
            }
        }

        Ok(entries)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let path = self.normalize_path(path);
        let mut files = self.files_mut();

        let parent_is_dir = path
            .parent()
            .and_then(|p| files.get(p))
            .map(|e| e.file_type == FileType::Directory)
            .unwrap_or(false);
        if !parent_is_dir {
            return Err(anyhow!("Parent directory missing for {:?}", path));
        }

        files.insert(
            path,
            MockEntry {
                content: Some(contents.to_string()),
                file_type: FileType::File,
            },
        );
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.add_dir(path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        let path = self.normalize_path(path);
        self.files_mut().retain(|p, _| !p.starts_with(&path));
        Ok(())
    }
}
