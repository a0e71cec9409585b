//! Registry lookup
//!
//! Resolves a requested name against a built output tree the way the registry
//! endpoint serves it: `registry`/`all` return the index, anything else is
//! looked up as a component, then an example, then a block. Item responses
//! get their registry dependencies rewritten against the requesting origin.

use crate::config::RegistryConfig;
use crate::fs::FileSystem;
use crate::output::{OutputSection, RegistryIndex, RegistryItem, INDEX_FILE};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};
use url::Url;

const INDEX_ALIASES: &[&str] = &["registry", "all"];
const EXAMPLE_PREFIX: &str = "example-";
const NOT_FOUND_SUGGESTIONS: &str =
    "Available endpoints: /registry.json, /all.json, or individual component names";

fn bare_slug() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z-]+$").expect("valid regex"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotFound {
    pub error: String,
    pub suggestions: String,
}

/// What a lookup returns; serialized without a wrapper
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LookupResponse {
    Index(RegistryIndex),
    Item(Box<RegistryItem>),
    NotFound(NotFound),
}

impl LookupResponse {
    pub fn is_found(&self) -> bool {
        !matches!(self, LookupResponse::NotFound(_))
    }
}

pub struct RegistryLookup<'a> {
    fs: &'a dyn FileSystem,
    out_dir: PathBuf,
    registry_name: String,
    homepage: String,
}

impl<'a> RegistryLookup<'a> {
    pub fn new(fs: &'a dyn FileSystem, config: &RegistryConfig) -> Self {
        Self {
            fs,
            out_dir: config.output_path(),
            registry_name: config.registry_name.clone(),
            homepage: config.homepage.clone(),
        }
    }

    /// Resolves `name` (with or without `.json`) for a request from `origin`.
    /// Never fails: unreadable files count as missing.
    pub fn resolve(&self, name: &str, origin: &str) -> LookupResponse {
        let name = name.replacen(".json", "", 1);

        if INDEX_ALIASES.contains(&name.as_str()) {
            return LookupResponse::Index(self.index());
        }

        if let Some(item) = self.find_item(&name) {
            return LookupResponse::Item(Box::new(rewrite_registry_dependencies(item, origin)));
        }

        warn!(name = %name, "Registry item not found");
        LookupResponse::NotFound(NotFound {
            error: format!("Component \"{}\" not found.", name),
            suggestions: NOT_FOUND_SUGGESTIONS.to_string(),
        })
    }

    /// The built index, or an empty one when it cannot be read
    pub fn index(&self) -> RegistryIndex {
        self.read_json(&self.out_dir.join(INDEX_FILE))
            .unwrap_or_else(|| RegistryIndex::empty(&self.registry_name, &self.homepage))
    }

    fn find_item(&self, name: &str) -> Option<RegistryItem> {
        let example = name.strip_prefix(EXAMPLE_PREFIX).unwrap_or(name);
        let candidates = [
            (OutputSection::Components, name),
            (OutputSection::Examples, example),
            (OutputSection::Blocks, name),
        ];

        candidates.into_iter().find_map(|(section, stem)| {
            let path = self
                .out_dir
                .join(section.dir_name())
                .join(format!("{}.json", stem));
            self.read_json(&path)
        })
    }

    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Option<T> {
        if !self.fs.is_file(path) {
            debug!(path = %path.display(), "Not in registry");
            return None;
        }

        let content = match self.fs.read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read registry file");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to parse registry file");
                None
            }
        }
    }
}

/// Makes registry dependencies installable from `origin`.
///
/// - `/x` becomes `<origin>/x`
/// - entries mentioning `.json` stay when absolute, else become `<origin>/<dep>`
/// - bare lowercase slugs stay bare (they name base components)
/// - anything else becomes `<origin>/<dep>.json`
pub fn rewrite_registry_dependencies(mut item: RegistryItem, origin: &str) -> RegistryItem {
    let base = match Url::parse(origin) {
        Ok(base) => base,
        Err(e) => {
            warn!(origin, error = %e, "Invalid request origin, leaving dependencies as stored");
            return item;
        }
    };

    item.registry_dependencies = item
        .registry_dependencies
        .into_iter()
        .map(|dep| rewrite_dependency(&base, dep))
        .collect();
    item
}

fn rewrite_dependency(base: &Url, dep: String) -> String {
    let path = if dep.starts_with('/') {
        dep.clone()
    } else if dep.contains(".json") {
        if dep.starts_with("http") {
            return dep;
        }
        format!("/{}", dep)
    } else if bare_slug().is_match(&dep) {
        return dep;
    } else {
        format!("/{}.json", dep)
    };

    match base.join(&path) {
        Ok(url) => url.to_string(),
        Err(e) => {
            warn!(dependency = %dep, error = %e, "Failed to rewrite registry dependency");
            dep
        }
    }
}
