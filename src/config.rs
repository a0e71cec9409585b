//! Configuration management for the registry builder
//!
//! Settings are loaded from environment variables with defaults and may be
//! overridden field by field (the CLI does this for its flags).
//!
//! # Environment Variables
//!
//! - `REGISTRY_ROOT`: Workspace root containing `packages/` - default: "."
//! - `REGISTRY_OUTPUT_DIR`: Output directory, relative to the root unless absolute -
//!   default: "apps/registry/server/assets/registry"
//! - `REGISTRY_BASE_URL`: Public URL the registry is served from
//! - `REGISTRY_NAME`: Registry name written to `index.json`
//! - `REGISTRY_HOMEPAGE`: Homepage written to `index.json`
//! - `REGISTRY_SCHEMA_URL`: `$schema` written into every item
//! - `REGISTRY_LIBRARY_SLUG`: Namespace of the library's components
//!   (`components/<slug>/`) - default: "elevenlabs-ui"
//! - `REGISTRY_LIBRARY_LABEL`: Human label used in component descriptions
//! - `REGISTRY_LOG_LEVEL`: Logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use uiregistry::RegistryConfig;
//!
//! let config = RegistryConfig::default();
//! config.validate().expect("Invalid configuration");
//! println!("{}", config.output_path().display());
//! ```

use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

const DEFAULT_OUTPUT_DIR: &str = "apps/registry/server/assets/registry";
const DEFAULT_BASE_URL: &str = "https://registry.elevenlabs-ui-vue.com";
const DEFAULT_REGISTRY_NAME: &str = "elevenlabs-ui-vue";
const DEFAULT_HOMEPAGE: &str = "https://www.elevenlabs-ui-vue.com";
const DEFAULT_SCHEMA_URL: &str = "https://shadcn-vue.com/schema/registry-item.json";
const DEFAULT_LIBRARY_SLUG: &str = "elevenlabs-ui";
const DEFAULT_LIBRARY_LABEL: &str = "ElevenLabs UI";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Import prefix of the separately distributed base component system.
pub const UI_ALIAS_PREFIX: &str = "@/components/ui/";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A URL setting did not parse
    #[error("Invalid URL for {field}: {value} ({error})")]
    InvalidUrl {
        field: &'static str,
        value: String,
        error: String,
    },

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Main configuration for a registry build
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Workspace root containing `packages/`
    pub root_dir: PathBuf,

    /// Output directory (relative paths are resolved against `root_dir`)
    pub output_dir: PathBuf,

    /// Public base URL, used for registry-dependency descriptor URLs
    pub base_url: String,

    /// Registry name written to the index
    pub registry_name: String,

    /// Homepage written to the index
    pub homepage: String,

    /// `$schema` value for item descriptors
    pub schema_url: String,

    /// Namespace of the library's own components
    pub library_slug: String,

    /// Human label used in component descriptions
    pub library_label: String,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for RegistryConfig {
    /// Loads from `REGISTRY_*` environment variables, falling back to defaults
    fn default() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }
}

impl RegistryConfig {
    /// Built-in defaults rooted at `root_dir`, ignoring the environment
    pub fn for_root(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            ..Self::from_lookup(|_| None)
        }
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            root_dir: PathBuf::from(var("REGISTRY_ROOT", ".")),
            output_dir: PathBuf::from(var("REGISTRY_OUTPUT_DIR", DEFAULT_OUTPUT_DIR)),
            base_url: var("REGISTRY_BASE_URL", DEFAULT_BASE_URL),
            registry_name: var("REGISTRY_NAME", DEFAULT_REGISTRY_NAME),
            homepage: var("REGISTRY_HOMEPAGE", DEFAULT_HOMEPAGE),
            schema_url: var("REGISTRY_SCHEMA_URL", DEFAULT_SCHEMA_URL),
            library_slug: var("REGISTRY_LIBRARY_SLUG", DEFAULT_LIBRARY_SLUG),
            library_label: var("REGISTRY_LIBRARY_LABEL", DEFAULT_LIBRARY_LABEL),
            log_level: var("REGISTRY_LOG_LEVEL", DEFAULT_LOG_LEVEL).to_lowercase(),
        }
    }

    /// Validates URLs, the library slug and the log level
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_http_url("base_url", &self.base_url)?;
        check_http_url("homepage", &self.homepage)?;
        check_http_url("schema_url", &self.schema_url)?;

        if self.registry_name.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Registry name cannot be empty".to_string(),
            ));
        }

        if self.library_slug.is_empty() || self.library_slug.contains('/') {
            return Err(ConfigError::ValidationFailed(format!(
                "Library slug must be a single non-empty path segment, got '{}'",
                self.library_slug
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn elements_dir(&self) -> PathBuf {
        self.root_dir.join("packages").join("elements")
    }

    pub fn elements_src(&self) -> PathBuf {
        self.elements_dir().join("src")
    }

    pub fn examples_dir(&self) -> PathBuf {
        self.root_dir.join("packages").join("examples")
    }

    pub fn examples_src(&self) -> PathBuf {
        self.examples_dir().join("src")
    }

    pub fn blocks_src(&self) -> PathBuf {
        self.root_dir.join("packages").join("blocks").join("src")
    }

    pub fn shadcn_dir(&self) -> PathBuf {
        self.root_dir.join("packages").join("shadcn-vue")
    }

    /// Manifests whose dependency names feed the allow-lists, elements first
    pub fn manifest_paths(&self) -> Vec<PathBuf> {
        vec![
            self.elements_dir().join("package.json"),
            self.examples_dir().join("package.json"),
            self.shadcn_dir().join("package.json"),
        ]
    }

    pub fn output_path(&self) -> PathBuf {
        if self.output_dir.is_absolute() {
            self.output_dir.clone()
        } else {
            self.root_dir.join(&self.output_dir)
        }
    }

    /// Output path prefix of the library's components, e.g. `components/elevenlabs-ui/`
    pub fn component_base(&self) -> String {
        format!("components/{}/", self.library_slug)
    }

    /// Import prefix of the library's components, e.g. `@/components/elevenlabs-ui/`
    pub fn library_alias(&self) -> String {
        format!("@/{}", self.component_base())
    }

    /// Workspace package aliases and what they become in published content
    pub fn alias_rewrites(&self) -> Vec<(String, String)> {
        vec![
            ("@repo/shadcn-vue/".to_string(), "@/".to_string()),
            ("@repo/elements/".to_string(), self.library_alias()),
        ]
    }

    /// Descriptor URL of a registry item
    pub fn item_url(&self, name: &str) -> String {
        format!("{}/{}.json", self.base_url.trim_end_matches('/'), name)
    }

    /// Converts configuration to a display map for output formatting
    pub fn to_display_map(&self) -> std::collections::BTreeMap<String, String> {
        let mut map = std::collections::BTreeMap::new();

        map.insert("root_dir".to_string(), self.root_dir.display().to_string());
        map.insert(
            "output_dir".to_string(),
            self.output_path().display().to_string(),
        );
        map.insert("base_url".to_string(), self.base_url.clone());
        map.insert("registry_name".to_string(), self.registry_name.clone());
        map.insert("homepage".to_string(), self.homepage.clone());
        map.insert("library_slug".to_string(), self.library_slug.clone());
        map.insert("log_level".to_string(), self.log_level.clone());

        map
    }
}

fn check_http_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        error: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
            error: format!("unsupported scheme '{}'", other),
        }),
    }
}

impl fmt::Display for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Registry Configuration:")?;
        writeln!(f, "  Root: {}", self.root_dir.display())?;
        writeln!(f, "  Output: {}", self.output_path().display())?;
        writeln!(f, "  Base URL: {}", self.base_url)?;
        writeln!(f, "  Name: {}", self.registry_name)?;
        writeln!(f, "  Homepage: {}", self.homepage)?;
        writeln!(f, "  Library: {}", self.library_slug)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
