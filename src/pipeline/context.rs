//! State shared by the build phases

use crate::config::RegistryConfig;
use crate::dependencies::DependencyClassifier;
use crate::fs::FileSystem;
use crate::imports::ImportExtractor;
use crate::output::{AssetFile, OutputSection, RegistryItem, WrittenItem};
use crate::progress::{ProgressEvent, ProgressHandler};
use crate::scan::BlockMetaTable;
use crate::validation::Validator;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::report::SkippedItem;

/// An assembled item and where it will be written
#[derive(Debug, Clone)]
pub struct PendingItem {
    pub section: OutputSection,
    pub file_stem: String,
    pub item: RegistryItem,
}

/// Everything the scan phase found
#[derive(Debug, Default)]
pub struct DiscoveredSources {
    pub components: Vec<AssetFile>,
    pub examples: Vec<AssetFile>,
    pub blocks: BTreeMap<String, Vec<AssetFile>>,
    pub block_meta: BlockMetaTable,
}

pub struct BuildContext<'a> {
    pub fs: &'a dyn FileSystem,
    pub config: &'a RegistryConfig,
    pub extractor: &'a dyn ImportExtractor,
    pub validator: &'a Validator,
    progress: &'a dyn ProgressHandler,

    pub classifier: Option<DependencyClassifier>,
    pub sources: DiscoveredSources,
    /// Assembled, not yet validated
    pub pending: Vec<PendingItem>,
    /// Passed validation, in index order
    pub accepted: Vec<PendingItem>,
    pub skipped: Vec<SkippedItem>,
    pub written: Vec<WrittenItem>,
    pub index_path: Option<PathBuf>,
}

impl<'a> BuildContext<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        config: &'a RegistryConfig,
        extractor: &'a dyn ImportExtractor,
        validator: &'a Validator,
        progress: &'a dyn ProgressHandler,
    ) -> Self {
        Self {
            fs,
            config,
            extractor,
            validator,
            progress,
            classifier: None,
            sources: DiscoveredSources::default(),
            pending: Vec::new(),
            accepted: Vec::new(),
            skipped: Vec::new(),
            written: Vec::new(),
            index_path: None,
        }
    }

    pub fn report(&self, event: ProgressEvent) {
        self.progress.on_progress(&event);
    }
}
