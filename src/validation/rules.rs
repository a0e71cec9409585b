use crate::output::schema::{RegistryItem, RegistryType};
use anyhow::Result;
use regex::Regex;
use std::sync::OnceLock;

pub trait ValidationRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn validate(&self, item: &RegistryItem) -> Result<()>;
}

pub struct RequiredFieldsRule;

impl ValidationRule for RequiredFieldsRule {
    fn name(&self) -> &'static str {
        "RequiredFields"
    }

    fn validate(&self, item: &RegistryItem) -> Result<()> {
        if item.name.trim().is_empty() {
            anyhow::bail!("Name cannot be empty");
        }
        if item.title.trim().is_empty() {
            anyhow::bail!("Title cannot be empty");
        }
        Ok(())
    }
}

/// Names become file stems and URL path segments, so they must be a single
/// path segment. Anything else the item schema allows is accepted.
pub struct ValidNameRule;

fn item_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s/\\]+$").expect("valid regex"))
}

impl ValidationRule for ValidNameRule {
    fn name(&self) -> &'static str {
        "ValidName"
    }

    fn validate(&self, item: &RegistryItem) -> Result<()> {
        if !item_name_re().is_match(&item.name) || item.name == "." || item.name == ".." {
            anyhow::bail!(
                "Name '{}' must be a single path segment without whitespace",
                item.name
            );
        }
        Ok(())
    }
}

pub struct NonEmptyFilesRule;

impl ValidationRule for NonEmptyFilesRule {
    fn name(&self) -> &'static str {
        "NonEmptyFiles"
    }

    fn validate(&self, item: &RegistryItem) -> Result<()> {
        if item.files.is_empty() {
            anyhow::bail!("Files must be a non-empty array");
        }
        Ok(())
    }
}

pub struct ValidFilePathsRule;

impl ValidationRule for ValidFilePathsRule {
    fn name(&self) -> &'static str {
        "ValidFilePaths"
    }

    fn validate(&self, item: &RegistryItem) -> Result<()> {
        for (i, file) in item.files.iter().enumerate() {
            if file.path.is_empty() {
                anyhow::bail!("files[{}] path cannot be empty", i);
            }
            if file.path.starts_with('/') || file.path.contains('\\') {
                anyhow::bail!("files[{}] path '{}' must be relative and POSIX", i, file.path);
            }
            if file.path.split('/').any(|segment| segment == "..") {
                anyhow::bail!("files[{}] path '{}' cannot contain '..'", i, file.path);
            }
        }
        Ok(())
    }
}

pub struct PageTargetRule;

impl ValidationRule for PageTargetRule {
    fn name(&self) -> &'static str {
        "PageTarget"
    }

    fn validate(&self, item: &RegistryItem) -> Result<()> {
        for (i, file) in item.files.iter().enumerate() {
            let has_target = file.target.as_deref().is_some_and(|t| !t.is_empty());
            if file.kind == RegistryType::Page && !has_target {
                anyhow::bail!("files[{}] of type registry:page requires a target", i);
            }
        }
        Ok(())
    }
}

/// Every file of a block bundle carries an install target
pub struct BlockTargetsRule;

impl ValidationRule for BlockTargetsRule {
    fn name(&self) -> &'static str {
        "BlockTargets"
    }

    fn validate(&self, item: &RegistryItem) -> Result<()> {
        let is_block_bundle = item.kind == RegistryType::Block
            && item.files.iter().any(|f| f.path.starts_with("blocks/"));
        if !is_block_bundle {
            return Ok(());
        }

        for (i, file) in item.files.iter().enumerate() {
            if file.target.as_deref().map_or(true, str::is_empty) {
                anyhow::bail!("files[{}] '{}' of a block requires a target", i, file.path);
            }
        }
        Ok(())
    }
}
