use crate::output::{OutputWriter, RegistryIndex};
use crate::pipeline::context::BuildContext;
use crate::pipeline::phase_trait::BuildPhase;
use crate::progress::ProgressEvent;
use anyhow::Result;

/// Regenerates the output tree from the accepted items
pub struct WritePhase;

impl BuildPhase for WritePhase {
    fn name(&self) -> &'static str {
        "WritePhase"
    }

    fn execute(&self, context: &mut BuildContext<'_>) -> Result<()> {
        let writer = OutputWriter::new(context.fs, context.config.output_path());
        writer.prepare()?;

        let mut written = Vec::with_capacity(context.accepted.len());
        for pending in &context.accepted {
            let item = writer.write_item(pending.section, &pending.file_stem, &pending.item)?;
            context.report(ProgressEvent::ItemWritten {
                name: item.name.clone(),
                section: item.section,
            });
            written.push(item);
        }

        let index = RegistryIndex {
            name: context.config.registry_name.clone(),
            homepage: context.config.homepage.clone(),
            items: context.accepted.iter().map(|p| p.item.summary()).collect(),
        };
        context.index_path = Some(writer.write_index(&index)?);
        context.written = written;
        Ok(())
    }
}
