//! Output tree writer
//!
//! The output directory is regenerated from scratch on every build: the old
//! tree is removed, the section directories recreated, then every item and
//! the index written with plain overwrites.

use super::schema::{RegistryIndex, RegistryItem};
use crate::fs::FileSystem;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const INDEX_FILE: &str = "index.json";

/// Per-kind subdirectory of the output tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSection {
    Components,
    Examples,
    Blocks,
}

impl OutputSection {
    pub const ALL: [OutputSection; 3] = [
        OutputSection::Components,
        OutputSection::Examples,
        OutputSection::Blocks,
    ];

    pub fn dir_name(&self) -> &'static str {
        match self {
            OutputSection::Components => "components",
            OutputSection::Examples => "examples",
            OutputSection::Blocks => "blocks",
        }
    }
}

/// A descriptor that made it to disk
#[derive(Debug, Clone, Serialize)]
pub struct WrittenItem {
    pub name: String,
    pub section: OutputSection,
    pub path: PathBuf,
}

pub struct OutputWriter<'a> {
    fs: &'a dyn FileSystem,
    out_dir: PathBuf,
}

impl<'a> OutputWriter<'a> {
    pub fn new(fs: &'a dyn FileSystem, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Deletes any previous output and recreates the section directories
    pub fn prepare(&self) -> Result<()> {
        debug!(out_dir = %self.out_dir.display(), "Cleaning output directory");
        self.fs
            .remove_dir_all(&self.out_dir)
            .context("Failed to clean output directory")?;

        for section in OutputSection::ALL {
            self.fs
                .create_dir_all(&self.out_dir.join(section.dir_name()))
                .with_context(|| format!("Failed to create {} directory", section.dir_name()))?;
        }
        Ok(())
    }

    pub fn write_item(
        &self,
        section: OutputSection,
        file_stem: &str,
        item: &RegistryItem,
    ) -> Result<WrittenItem> {
        let path = self
            .out_dir
            .join(section.dir_name())
            .join(format!("{}.json", file_stem));
        self.fs.write(&path, &item.to_json()?)?;

        debug!(item = %item.name, path = %path.display(), "Wrote registry item");
        Ok(WrittenItem {
            name: item.name.clone(),
            section,
            path,
        })
    }

    pub fn write_index(&self, index: &RegistryIndex) -> Result<PathBuf> {
        let path = self.out_dir.join(INDEX_FILE);
        self.fs.write(&path, &index.to_json()?)?;

        info!(
            items = index.items.len(),
            path = %path.display(),
            "Wrote registry index"
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use crate::output::schema::{AssetFile, RegistryType};

    fn item(name: &str) -> RegistryItem {
        RegistryItem {
            schema: None,
            name: name.to_string(),
            kind: RegistryType::Component,
            title: name.to_string(),
            description: String::new(),
            categories: None,
            meta: None,
            files: vec![AssetFile::new(RegistryType::Component, "a.vue", "")],
            dependencies: vec![],
            dev_dependencies: vec![],
            registry_dependencies: vec![],
        }
    }

    #[test]
    fn test_prepare_removes_stale_output() {
        let fs = MockFileSystem::new();
        fs.add_file("out/components/removed.json", "{}");
        let writer = OutputWriter::new(&fs, "/mock/out");

        writer.prepare().unwrap();

        assert!(!fs.exists(Path::new("/mock/out/components/removed.json")));
        for section in OutputSection::ALL {
            assert!(fs.is_dir(&Path::new("/mock/out").join(section.dir_name())));
        }
    }

    #[test]
    fn test_write_item_and_index() {
        let fs = MockFileSystem::new();
        let writer = OutputWriter::new(&fs, "/mock/out");
        writer.prepare().unwrap();

        let written = writer
            .write_item(OutputSection::Examples, "orb", &item("example-orb"))
            .unwrap();
        assert_eq!(written.path, Path::new("/mock/out/examples/orb.json"));
        assert_eq!(written.name, "example-orb");

        let mut index = RegistryIndex::empty("lib", "https://lib.test");
        index.items.push(item("example-orb").summary());
        let index_path = writer.write_index(&index).unwrap();

        let content = fs.read_to_string(&index_path).unwrap();
        assert!(content.contains("example-orb"));
    }

    #[test]
    fn test_write_without_prepare_fails() {
        let fs = MockFileSystem::new();
        let writer = OutputWriter::new(&fs, "/mock/out");

        assert!(writer
            .write_item(OutputSection::Blocks, "x", &item("x"))
            .is_err());
    }
}
