use crate::fs::FileSystem;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, warn};

/// Runtime dependencies that are never published: the UI framework and the
/// workspace meta package.
const EXCLUDED_RUNTIME: &[&str] = &["vue", "@repo/shadcn-vue"];

/// Dev dependencies that are never published.
const EXCLUDED_DEV: &[&str] = &["typescript"];

const INTERNAL_SCOPE: &str = "@repo/";

/// The parts of a `package.json` the builder cares about
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse package.json")
    }

    /// Reads a manifest, degrading to an empty one when it is missing or malformed
    pub fn load_or_default(fs: &dyn FileSystem, path: &Path) -> Self {
        match fs.read_to_string(path).and_then(|content| Self::parse(&content)) {
            Ok(manifest) => {
                debug!(
                    path = %path.display(),
                    dependencies = manifest.dependencies.len(),
                    dev_dependencies = manifest.dev_dependencies.len(),
                    "Loaded manifest"
                );
                manifest
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Manifest unavailable, ignoring");
                Self::default()
            }
        }
    }

    /// Workspace-internal packages this manifest depends on, other than the meta package
    fn internal_packages(&self) -> impl Iterator<Item = &String> {
        self.dependencies.keys().filter(|name| {
            name.starts_with(INTERNAL_SCOPE) && name.as_str() != "@repo/shadcn-vue"
        })
    }
}

/// Package names eligible to be reported as dependencies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowLists {
    pub runtime: BTreeSet<String>,
    pub dev: BTreeSet<String>,
}

impl AllowLists {
    pub fn new<R, D, S>(runtime: R, dev: D) -> Self
    where
        R: IntoIterator<Item = S>,
        D: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            runtime: runtime.into_iter().map(Into::into).collect(),
            dev: dev.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds the allow-lists from manifests, the first being the component
    /// package whose internal workspace dependencies are excluded.
    pub fn from_manifests(manifests: &[PackageManifest]) -> Self {
        let internal: BTreeSet<&String> = manifests
            .first()
            .map(|m| m.internal_packages().collect())
            .unwrap_or_default();

        let runtime = manifests
            .iter()
            .flat_map(|m| m.dependencies.keys())
            .filter(|name| !EXCLUDED_RUNTIME.contains(&name.as_str()))
            .filter(|name| !internal.contains(name))
            .cloned()
            .collect();

        let dev = manifests
            .iter()
            .flat_map(|m| m.dev_dependencies.keys())
            .filter(|name| !EXCLUDED_DEV.contains(&name.as_str()))
            .cloned()
            .collect();

        Self { runtime, dev }
    }

    pub fn load(fs: &dyn FileSystem, paths: &[impl AsRef<Path>]) -> Self {
        let manifests: Vec<PackageManifest> = paths
            .iter()
            .map(|p| PackageManifest::load_or_default(fs, p.as_ref()))
            .collect();
        Self::from_manifests(&manifests)
    }

    pub fn is_runtime(&self, name: &str) -> bool {
        self.runtime.contains(name)
    }

    pub fn is_dev(&self, name: &str) -> bool {
        self.dev.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    const ELEMENTS: &str = r#"{
        "name": "@repo/elements",
        "dependencies": {
            "vue": "^3.5.0",
            "@repo/shadcn-vue": "workspace:*",
            "@repo/utils": "workspace:*",
            "@vueuse/core": "^13.0.0",
            "lodash": "^4.17.21"
        },
        "devDependencies": {
            "typescript": "^5.8.0",
            "@types/lodash": "^4.17.0"
        }
    }"#;

    const SHADCN: &str = r#"{
        "dependencies": { "reka-ui": "^2.0.0", "lucide-vue-next": "^0.500.0" }
    }"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = PackageManifest::parse(ELEMENTS).unwrap();
        assert_eq!(manifest.dependencies.len(), 5);
        assert!(manifest.dev_dependencies.contains_key("@types/lodash"));
    }

    #[test]
    fn test_parse_manifest_without_dependency_sections() {
        let manifest = PackageManifest::parse(r#"{"name": "x"}"#).unwrap();
        assert!(manifest.dependencies.is_empty());
        assert!(manifest.dev_dependencies.is_empty());
    }

    #[test]
    fn test_exclusions() {
        let lists = AllowLists::from_manifests(&[PackageManifest::parse(ELEMENTS).unwrap()]);

        assert!(lists.is_runtime("lodash"));
        assert!(lists.is_runtime("@vueuse/core"));
        assert!(!lists.is_runtime("vue"));
        assert!(!lists.is_runtime("@repo/shadcn-vue"));
        assert!(!lists.is_runtime("@repo/utils"));

        assert!(lists.is_dev("@types/lodash"));
        assert!(!lists.is_dev("typescript"));
    }

    #[test]
    fn test_union_across_manifests() {
        let lists = AllowLists::from_manifests(&[
            PackageManifest::parse(ELEMENTS).unwrap(),
            PackageManifest::parse(SHADCN).unwrap(),
        ]);

        assert!(lists.is_runtime("lodash"));
        assert!(lists.is_runtime("reka-ui"));
        assert!(lists.is_runtime("lucide-vue-next"));
    }

    #[test]
    fn test_load_tolerates_missing_and_malformed() {
        let fs = MockFileSystem::new();
        fs.add_file("elements/package.json", ELEMENTS);
        fs.add_file("examples/package.json", "{ not json");

        let lists = AllowLists::load(
            &fs,
            &[
                "/mock/elements/package.json",
                "/mock/examples/package.json",
                "/mock/shadcn/package.json",
            ],
        );

        assert!(lists.is_runtime("lodash"));
        assert_eq!(lists.runtime.len(), 2);
    }

    #[test]
    fn test_no_dependencies_gives_empty_lists() {
        let lists = AllowLists::from_manifests(&[PackageManifest::default()]);
        assert_eq!(lists, AllowLists::default());
    }
}
