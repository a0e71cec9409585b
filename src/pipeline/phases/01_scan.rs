use crate::dependencies::{AllowLists, DependencyClassifier};
use crate::pipeline::context::{BuildContext, DiscoveredSources};
use crate::pipeline::phase_trait::BuildPhase;
use crate::progress::ProgressEvent;
use crate::scan::SourceDiscovery;
use anyhow::Result;
use std::time::Instant;

/// Loads the allow-lists and reads every source tree
pub struct ScanPhase;

impl BuildPhase for ScanPhase {
    fn name(&self) -> &'static str {
        "ScanPhase"
    }

    fn execute(&self, context: &mut BuildContext<'_>) -> Result<()> {
        let start = Instant::now();

        let allow = AllowLists::load(context.fs, &context.config.manifest_paths());
        context.report(ProgressEvent::AllowListsLoaded {
            runtime: allow.runtime.len(),
            dev: allow.dev.len(),
        });
        context.classifier = Some(DependencyClassifier::new(allow, context.config));

        let discovery = SourceDiscovery::new(context.fs, context.config);
        let sources = DiscoveredSources {
            components: discovery.components()?,
            examples: discovery.examples(),
            blocks: discovery.blocks(),
            block_meta: discovery.block_meta(),
        };

        context.report(ProgressEvent::SourcesDiscovered {
            components: sources.components.len(),
            examples: sources.examples.len(),
            blocks: sources.blocks.len(),
            scan_time: start.elapsed(),
        });
        context.sources = sources;
        Ok(())
    }
}
