use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// `type` tag shared by registry items and their files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistryType {
    #[serde(rename = "registry:component")]
    Component,
    #[serde(rename = "registry:block")]
    Block,
    #[serde(rename = "registry:page")]
    Page,
    #[serde(rename = "registry:ui")]
    Ui,
    #[serde(rename = "registry:lib")]
    Lib,
    #[serde(rename = "registry:hook")]
    Hook,
}

impl RegistryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryType::Component => "registry:component",
            RegistryType::Block => "registry:block",
            RegistryType::Page => "registry:page",
            RegistryType::Ui => "registry:ui",
            RegistryType::Lib => "registry:lib",
            RegistryType::Hook => "registry:hook",
        }
    }
}

impl fmt::Display for RegistryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source file shipped with a registry item.
///
/// `content` is present in item descriptors and dropped from index summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetFile {
    #[serde(default)]
    pub path: String,
    #[serde(rename = "type")]
    pub kind: RegistryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl AssetFile {
    pub fn new(kind: RegistryType, path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            content: Some(content.into()),
            target: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Path, type and target only
    pub fn summary(&self) -> Self {
        Self {
            content: None,
            ..self.clone()
        }
    }

    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// A full item descriptor, as written to `<kind>/<name>.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryItem {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RegistryType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
    #[serde(default)]
    pub files: Vec<AssetFile>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub dev_dependencies: Vec<String>,
    #[serde(default)]
    pub registry_dependencies: Vec<String>,
}

impl RegistryItem {
    pub fn summary(&self) -> ItemSummary {
        ItemSummary {
            name: self.name.clone(),
            kind: self.kind,
            title: self.title.clone(),
            description: self.description.clone(),
            categories: self.categories.clone(),
            meta: self.meta.clone(),
            files: self.files.iter().map(AssetFile::summary).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .with_context(|| format!("Failed to serialize registry item {}", self.name))
    }
}

/// Lightweight item entry of `index.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RegistryType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
    #[serde(default)]
    pub files: Vec<AssetFile>,
}

/// The aggregate `index.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryIndex {
    pub name: String,
    pub homepage: String,
    #[serde(default)]
    pub items: Vec<ItemSummary>,
}

impl RegistryIndex {
    pub fn empty(name: impl Into<String>, homepage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            homepage: homepage.into(),
            items: Vec::new(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize registry index")
    }
}
