//! Author-supplied block metadata
//!
//! Lives next to the blocks as `block-meta.toml`, one table per block:
//!
//! ```toml
//! [voice-chat-01]
//! description = "Voice chat with transcript"
//! categories = ["agents"]
//! iframe_height = "800px"
//! ```
//!
//! Known keys are typed; any other key is carried through into the item's
//! `meta` object untouched.

use crate::fs::FileSystem;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

pub const BLOCK_META_FILE: &str = "block-meta.toml";

#[derive(Debug, Error)]
pub enum BlockMetaError {
    #[error("Failed to parse block metadata: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid metadata for block '{block}': {reason}")]
    Invalid { block: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MobileMode {
    Component,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BlockMeta {
    pub description: String,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub iframe_height: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub mobile: Option<MobileMode>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

impl BlockMeta {
    fn check(&self, block: &str) -> Result<(), BlockMetaError> {
        let invalid = |reason: &str| BlockMetaError::Invalid {
            block: block.to_string(),
            reason: reason.to_string(),
        };

        if self.description.trim().is_empty() {
            return Err(invalid("description cannot be empty"));
        }
        if let Some(categories) = &self.categories {
            if categories.iter().any(|c| c.trim().is_empty()) {
                return Err(invalid("categories cannot contain empty names"));
            }
        }
        Ok(())
    }

    /// Everything except description and categories, as the item's `meta` object
    pub fn meta_fields(&self) -> Map<String, Value> {
        let mut meta = Map::new();
        if let Some(height) = &self.iframe_height {
            meta.insert("iframeHeight".to_string(), Value::String(height.clone()));
        }
        if let Some(class) = &self.class {
            meta.insert("class".to_string(), Value::String(class.clone()));
        }
        if let Some(MobileMode::Component) = self.mobile {
            meta.insert("mobile".to_string(), Value::String("component".to_string()));
        }
        for (key, value) in &self.extra {
            match serde_json::to_value(value) {
                Ok(json) => {
                    meta.insert(key.clone(), json);
                }
                Err(e) => warn!(key = %key, error = %e, "Dropping unrepresentable block meta field"),
            }
        }
        meta
    }
}

/// Block name to metadata, validated when loaded
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockMetaTable {
    entries: BTreeMap<String, BlockMeta>,
}

impl BlockMetaTable {
    pub fn parse(content: &str) -> Result<Self, BlockMetaError> {
        let entries: BTreeMap<String, BlockMeta> = toml::from_str(content)?;
        for (block, meta) in &entries {
            meta.check(block)?;
        }
        Ok(Self { entries })
    }

    /// Loads the table; a missing file means no metadata, an invalid one is
    /// reported and ignored.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Self {
        if !fs.is_file(path) {
            debug!(path = %path.display(), "No block metadata file");
            return Self::default();
        }

        let parsed = fs
            .read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| Self::parse(&content).map_err(|e| e.to_string()));

        match parsed {
            Ok(table) => {
                debug!(path = %path.display(), blocks = table.len(), "Loaded block metadata");
                table
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring invalid block metadata");
                Self::default()
            }
        }
    }

    pub fn get(&self, block: &str) -> Option<&BlockMeta> {
        self.entries.get(block)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
