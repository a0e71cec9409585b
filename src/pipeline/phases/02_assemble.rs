use crate::config::RegistryConfig;
use crate::dependencies::{ClassifyContext, DependencyClassification, DependencyClassifier};
use crate::imports::{imports_for_file, ImportExtractor};
use crate::output::{AssetFile, OutputSection, RegistryItem, RegistryType};
use crate::pipeline::context::{BuildContext, PendingItem};
use crate::pipeline::phase_trait::BuildPhase;
use crate::scan::{group_of, BlockMetaTable};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use tracing::{debug, info};

const EXAMPLE_PREFIX: &str = "example-";

/// `voice-chat` becomes `Voice Chat`
pub fn to_title(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds registry items from discovered sources, components first, then
/// examples, then blocks.
pub struct AssemblePhase;

impl BuildPhase for AssemblePhase {
    fn name(&self) -> &'static str {
        "AssemblePhase"
    }

    fn execute(&self, context: &mut BuildContext<'_>) -> Result<()> {
        let classifier = context
            .classifier
            .as_ref()
            .context("Dependency classifier must be loaded before assembly")?;

        let assembler = Assembler {
            config: context.config,
            extractor: context.extractor,
            classifier,
        };

        let mut pending = assembler.components(&context.sources.components);
        pending.extend(assembler.examples(&context.sources.examples));
        pending.extend(assembler.blocks(&context.sources.blocks, &context.sources.block_meta));

        info!(items = pending.len(), "Assembled registry items");
        context.pending = pending;
        Ok(())
    }
}

struct Assembler<'a> {
    config: &'a RegistryConfig,
    extractor: &'a dyn ImportExtractor,
    classifier: &'a DependencyClassifier,
}

impl Assembler<'_> {
    fn classify_file(&self, file: &AssetFile, group: Option<&str>) -> DependencyClassification {
        let imports = imports_for_file(self.extractor, &file.path, file.content());
        let context = group.map(|group| ClassifyContext {
            file_path: &file.path,
            group,
        });
        self.classifier.classify(&imports, context)
    }

    fn item(
        &self,
        name: String,
        kind: RegistryType,
        title: String,
        description: String,
        files: Vec<AssetFile>,
        deps: DependencyClassification,
    ) -> RegistryItem {
        RegistryItem {
            schema: Some(self.config.schema_url.clone()),
            name,
            kind,
            title,
            description,
            categories: None,
            meta: None,
            files,
            dependencies: deps.dependencies.into_iter().collect(),
            dev_dependencies: deps.dev_dependencies.into_iter().collect(),
            registry_dependencies: deps.registry_dependencies.into_iter().collect(),
        }
    }

    fn components(&self, files: &[AssetFile]) -> Vec<PendingItem> {
        let base = self.config.component_base();
        let mut groups: BTreeMap<String, Vec<AssetFile>> = BTreeMap::new();
        for file in files {
            match group_of(&file.path, &base) {
                Some(group) => groups.entry(group).or_default().push(file.clone()),
                None => debug!(path = %file.path, "Component file outside the library base"),
            }
        }

        groups
            .into_iter()
            .map(|(group, files)| {
                let mut deps = DependencyClassification::default();
                for file in &files {
                    deps.merge(self.classify_file(file, Some(&group)));
                }
                debug!(group = %group, files = files.len(), "Assembled component");

                let description = format!(
                    "{} {} components.",
                    self.config.library_label,
                    group.replacen('-', " ", 1)
                );
                let item = self.item(
                    group.clone(),
                    RegistryType::Component,
                    to_title(&group),
                    description,
                    files,
                    deps,
                );
                PendingItem {
                    section: OutputSection::Components,
                    file_stem: group,
                    item,
                }
            })
            .collect()
    }

    fn examples(&self, files: &[AssetFile]) -> Vec<PendingItem> {
        files
            .iter()
            .filter_map(|file| {
                let file_name = file.path.rsplit('/').next()?;
                let stem = file_name.strip_suffix(".vue").unwrap_or(file_name).to_string();
                let deps = self.classify_file(file, None);

                let item = self.item(
                    format!("{EXAMPLE_PREFIX}{stem}"),
                    RegistryType::Block,
                    format!("{} Example", to_title(&stem)),
                    format!("Example implementation of {}.", stem.replacen('-', " ", 1)),
                    vec![file.clone()],
                    deps,
                );
                Some(PendingItem {
                    section: OutputSection::Examples,
                    file_stem: stem,
                    item,
                })
            })
            .collect()
    }

    fn blocks(
        &self,
        blocks: &BTreeMap<String, Vec<AssetFile>>,
        meta_table: &BlockMetaTable,
    ) -> Vec<PendingItem> {
        blocks
            .iter()
            .map(|(name, files)| {
                let mut deps = DependencyClassification::default();
                for file in files {
                    deps.merge(self.classify_file(file, None));
                }

                let meta = meta_table.get(name);
                if meta.is_none() {
                    debug!(block = %name, "No metadata for block");
                }

                let mut item = self.item(
                    name.clone(),
                    RegistryType::Block,
                    to_title(name),
                    meta.map(|m| m.description.clone()).unwrap_or_default(),
                    files.clone(),
                    deps,
                );
                item.categories = meta.and_then(|m| m.categories.clone());
                item.meta = meta
                    .map(|m| m.meta_fields())
                    .filter(|fields| !fields.is_empty());

                PendingItem {
                    section: OutputSection::Blocks,
                    file_stem: name.clone(),
                    item,
                }
            })
            .collect()
    }
}
