use super::block_meta::{BlockMetaTable, BLOCK_META_FILE};
use super::walker::{list_files, list_subdirs, relative_posix, walk_source_files};
use crate::config::RegistryConfig;
use crate::fs::FileSystem;
use crate::output::{AssetFile, RegistryType};
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

const PAGE_FILE: &str = "page.vue";
const BLOCK_COMPONENTS_DIR: &str = "components/";

fn numeric_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[-_]\d+").expect("valid regex"))
}

fn digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("valid regex"))
}

/// Route segment for a block's page: `voice-chat-01` becomes `voice-chat`
pub fn sanitize_slug(input: &str) -> String {
    let without_suffix = numeric_suffix().replace_all(input, "");
    digits().replace_all(&without_suffix, "").to_lowercase()
}

/// Group of a component output path, the first segment under `component_base`
pub fn group_of(path: &str, component_base: &str) -> Option<String> {
    path.strip_prefix(component_base)?
        .split('/')
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Reads the three source trees into asset files with aliases already rewritten
pub struct SourceDiscovery<'a> {
    fs: &'a dyn FileSystem,
    config: &'a RegistryConfig,
    rewrites: Vec<(String, String)>,
}

impl<'a> SourceDiscovery<'a> {
    pub fn new(fs: &'a dyn FileSystem, config: &'a RegistryConfig) -> Self {
        Self {
            fs,
            config,
            rewrites: config.alias_rewrites(),
        }
    }

    fn read_source(&self, path: &Path) -> Result<String> {
        let raw = self
            .fs
            .read_to_string(path)
            .with_context(|| format!("Failed to read source file {}", path.display()))?;
        Ok(self.rewrite_aliases(&raw))
    }

    /// Examples and blocks are optional: an unreadable file is logged and left out
    fn read_optional_source(&self, path: &Path) -> Option<String> {
        match self.read_source(path) {
            Ok(content) => Some(content),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %format!("{:#}", e),
                    "Skipping unreadable source file"
                );
                None
            }
        }
    }

    fn rewrite_aliases(&self, content: &str) -> String {
        self.rewrites
            .iter()
            .fold(content.to_string(), |acc, (from, to)| acc.replace(from, to))
    }

    /// Every library source file, as `components/<library>/<rel>`
    pub fn components(&self) -> Result<Vec<AssetFile>> {
        let src = self.config.elements_src();
        let mut paths = walk_source_files(self.fs, &src, &src);
        paths.sort();

        let base = self.config.component_base();
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(rel) = relative_posix(&src, &path) else {
                continue;
            };
            let content = self.read_source(&path)?;
            debug!(path = %rel, "Discovered component source");
            files.push(AssetFile::new(
                RegistryType::Component,
                format!("{base}{rel}"),
                content,
            ));
        }

        info!(count = files.len(), dir = %src.display(), "Discovered component files");
        Ok(files)
    }

    /// Root-level `.vue` files of the examples package
    pub fn examples(&self) -> Vec<AssetFile> {
        let src = self.config.examples_src();
        let mut paths = list_files(self.fs, &src, "vue");
        paths.sort();

        let base = self.config.component_base();
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(content) = self.read_optional_source(&path) else {
                continue;
            };
            debug!(file = %name, "Discovered example");
            files.push(AssetFile::new(
                RegistryType::Block,
                format!("{base}examples/{name}"),
                content,
            ));
        }

        info!(count = files.len(), dir = %src.display(), "Discovered example files");
        files
    }

    /// Files of each block directory, keyed by block name; empty blocks are left out
    pub fn blocks(&self) -> BTreeMap<String, Vec<AssetFile>> {
        let blocks_src = self.config.blocks_src();
        let mut blocks = BTreeMap::new();

        for block in list_subdirs(self.fs, &blocks_src) {
            let block_dir = blocks_src.join(&block);
            let mut paths = walk_source_files(self.fs, &block_dir, &block_dir);
            paths.sort();

            let mut files = Vec::with_capacity(paths.len());
            for path in paths {
                let Some(rel) = relative_posix(&block_dir, &path) else {
                    continue;
                };
                let Some(content) = self.read_optional_source(&path) else {
                    continue;
                };
                files.push(block_asset(&block, &rel, content));
            }

            if files.is_empty() {
                debug!(block = %block, "Skipping block without source files");
                continue;
            }
            debug!(block = %block, files = files.len(), "Discovered block");
            blocks.insert(block, files);
        }

        info!(count = blocks.len(), dir = %blocks_src.display(), "Discovered blocks");
        blocks
    }

    pub fn block_meta(&self) -> BlockMetaTable {
        BlockMetaTable::load(self.fs, &self.config.blocks_src().join(BLOCK_META_FILE))
    }
}

fn block_asset(block: &str, rel: &str, content: String) -> AssetFile {
    let path = format!("blocks/{block}/{rel}");
    let basename = rel.rsplit('/').next().unwrap_or(rel);

    if basename == PAGE_FILE {
        let target = format!("pages/{}/index.vue", sanitize_slug(block));
        return AssetFile::new(RegistryType::Page, path, content).with_target(target);
    }

    let target = match rel.strip_prefix(BLOCK_COMPONENTS_DIR) {
        Some(inner) => format!("components/{inner}"),
        None => format!("components/{basename}"),
    };
    AssetFile::new(RegistryType::Component, path, content).with_target(target)
}
