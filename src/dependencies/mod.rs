//! Dependency classification
//!
//! [`AllowLists`] is derived once per build from the workspace manifests and
//! handed to a [`DependencyClassifier`], which sorts each file's import
//! specifiers into runtime, dev and registry dependencies.

mod classifier;
mod manifest;

pub use classifier::{ClassifyContext, DependencyClassification, DependencyClassifier};
pub use manifest::{AllowLists, PackageManifest};
