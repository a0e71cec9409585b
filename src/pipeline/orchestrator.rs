use super::context::BuildContext;
use super::phase_trait::BuildPhase;
use super::phases::{AssemblePhase, ScanPhase, ValidatePhase, WritePhase};
use super::report::BuildReport;
use crate::config::RegistryConfig;
use crate::fs::FileSystem;
use crate::imports::ImportExtractor;
use crate::progress::{NoOpHandler, ProgressEvent, ProgressHandler};
use crate::validation::Validator;
use anyhow::{Context, Result};
use std::time::Instant;
use tracing::debug;

/// Runs a full registry build over a workspace
pub struct RegistryBuilder<'a> {
    fs: &'a dyn FileSystem,
    config: &'a RegistryConfig,
    extractor: &'a dyn ImportExtractor,
    validator: Validator,
    progress: &'a dyn ProgressHandler,
}

impl<'a> RegistryBuilder<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        config: &'a RegistryConfig,
        extractor: &'a dyn ImportExtractor,
    ) -> Self {
        Self {
            fs,
            config,
            extractor,
            validator: Validator::new(),
            progress: &NoOpHandler,
        }
    }

    pub fn with_progress(mut self, progress: &'a dyn ProgressHandler) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn build(&self) -> Result<BuildReport> {
        let start = Instant::now();
        debug!(root = %self.config.root_dir.display(), output = %self.config.output_path().display(), "Building registry");
        self.progress.on_progress(&ProgressEvent::Started {
            root: self.config.root_dir.display().to_string(),
        });

        let mut context = BuildContext::new(
            self.fs,
            self.config,
            self.extractor,
            &self.validator,
            self.progress,
        );

        if let Err(e) = self.run_phases(&mut context) {
            self.progress.on_progress(&ProgressEvent::Failed {
                error: format!("{:#}", e),
            });
            return Err(e);
        }

        let report = BuildReport {
            output_dir: self.config.output_path(),
            index_path: context
                .index_path
                .context("Write phase finished without an index")?,
            written: context.written,
            skipped: context.skipped,
            duration: start.elapsed(),
        };

        self.progress.on_progress(&ProgressEvent::Completed {
            written: report.written.len(),
            skipped: report.skipped.len(),
            total_time: report.duration,
        });
        Ok(report)
    }

    fn run_phases(&self, context: &mut BuildContext<'_>) -> Result<()> {
        let phases: [&dyn BuildPhase; 4] = [&ScanPhase, &AssemblePhase, &ValidatePhase, &WritePhase];

        for phase in phases {
            debug!(phase = phase.name(), "Running phase");
            phase
                .execute(context)
                .with_context(|| format!("Phase {} failed", phase.name()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use crate::imports::OxcImportExtractor;
    use crate::output::OutputSection;
    use crate::validation::rules::ValidationRule;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingHandler {
        written: Arc<AtomicUsize>,
        completed: Arc<AtomicUsize>,
    }

    impl ProgressHandler for CountingHandler {
        fn on_progress(&self, event: &ProgressEvent) {
            match event {
                ProgressEvent::ItemWritten { .. } => {
                    self.written.fetch_add(1, Ordering::SeqCst);
                }
                ProgressEvent::Completed { .. } => {
                    self.completed.fetch_add(1, Ordering::SeqCst);
                }
                _ => {}
            }
        }
    }

    fn workspace() -> MockFileSystem {
        let fs = MockFileSystem::new();
        fs.add_file("packages/elements/src/orb/Orb.vue", "<template />");
        fs.add_file("packages/examples/src/orb.vue", "<template />");
        fs.add_file("packages/blocks/src/button-01/page.vue", "<template />");
        fs
    }

    #[test]
    fn test_build_reports_progress() {
        let fs = workspace();
        let config = RegistryConfig::for_root(fs.root().to_path_buf());
        let extractor = OxcImportExtractor;
        let handler = CountingHandler {
            written: Arc::new(AtomicUsize::new(0)),
            completed: Arc::new(AtomicUsize::new(0)),
        };

        let report = RegistryBuilder::new(&fs, &config, &extractor)
            .with_progress(&handler)
            .build()
            .unwrap();

        assert_eq!(report.written.len(), 3);
        assert_eq!(report.written_in(OutputSection::Components), 1);
        assert_eq!(report.written_in(OutputSection::Examples), 1);
        assert_eq!(report.written_in(OutputSection::Blocks), 1);
        assert!(report.is_clean());
        assert_eq!(handler.written.load(Ordering::SeqCst), 3);
        assert_eq!(handler.completed.load(Ordering::SeqCst), 1);
    }

    struct RejectBlocks;

    impl ValidationRule for RejectBlocks {
        fn name(&self) -> &'static str {
            "RejectBlocks"
        }

        fn validate(&self, item: &crate::output::RegistryItem) -> Result<()> {
            if item.name.ends_with("-01") {
                anyhow::bail!("blocks are not accepted");
            }
            Ok(())
        }
    }

    #[test]
    fn test_custom_validator() {
        let fs = workspace();
        let config = RegistryConfig::for_root(fs.root().to_path_buf());
        let extractor = OxcImportExtractor;

        let report = RegistryBuilder::new(&fs, &config, &extractor)
            .with_validator(Validator::with_rules(vec![Box::new(RejectBlocks)]))
            .build()
            .unwrap();

        assert_eq!(report.written.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].name, "button-01");
        assert!(report.skipped[0].reason.contains("[RejectBlocks]"));
    }

    #[test]
    fn test_build_empty_workspace() {
        let fs = MockFileSystem::new();
        let config = RegistryConfig::for_root(fs.root().to_path_buf());
        let extractor = OxcImportExtractor;

        let report = RegistryBuilder::new(&fs, &config, &extractor).build().unwrap();

        assert!(report.written.is_empty());
        assert!(fs.is_file(&report.index_path));
    }
}
