//! uiregistry - static component registry builder for Vue UI libraries
//!
//! Walks a component library workspace, extracts each source file's imports
//! and classifies them into npm runtime dependencies, dev dependencies and
//! references to other registry items. The result is a static JSON registry:
//! `index.json` plus one descriptor per component group, example and block,
//! ready to be served to an installer CLI.
//!
//! # Example Usage
//!
//! ```no_run
//! use uiregistry::fs::RealFileSystem;
//! use uiregistry::imports::OxcImportExtractor;
//! use uiregistry::pipeline::RegistryBuilder;
//! use uiregistry::RegistryConfig;
//!
//! let config = RegistryConfig::for_root("/path/to/workspace");
//! let fs = RealFileSystem::new();
//! let extractor = OxcImportExtractor;
//!
//! let report = RegistryBuilder::new(&fs, &config, &extractor).build()?;
//! println!("wrote {} items", report.written.len());
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Project Structure
//!
//! - [`scan`]: source discovery and block metadata
//! - [`imports`]: import extraction from `.ts` and `.vue` sources
//! - [`dependencies`]: allow-lists and the dependency classifier
//! - [`validation`]: item validation rules
//! - [`output`]: registry documents and the output writer
//! - [`pipeline`]: the build phases and [`RegistryBuilder`]
//! - [`lookup`]: resolving names against a built registry

pub mod cli;
pub mod config;
pub mod dependencies;
pub mod fs;
pub mod imports;
pub mod lookup;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod scan;
pub mod util;
pub mod validation;

pub use config::{ConfigError, RegistryConfig};
pub use dependencies::{AllowLists, DependencyClassification, DependencyClassifier};
pub use imports::{ImportExtractor, OxcImportExtractor};
pub use lookup::{LookupResponse, RegistryLookup};
pub use output::{RegistryIndex, RegistryItem};
pub use pipeline::{BuildReport, RegistryBuilder};
pub use util::{init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
