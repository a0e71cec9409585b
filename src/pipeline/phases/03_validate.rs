use crate::pipeline::context::BuildContext;
use crate::pipeline::phase_trait::BuildPhase;
use crate::pipeline::report::SkippedItem;
use crate::progress::ProgressEvent;
use anyhow::Result;
use tracing::warn;

/// Splits assembled items into accepted and skipped
pub struct ValidatePhase;

impl BuildPhase for ValidatePhase {
    fn name(&self) -> &'static str {
        "ValidatePhase"
    }

    fn execute(&self, context: &mut BuildContext<'_>) -> Result<()> {
        for pending in std::mem::take(&mut context.pending) {
            match context.validator.validate(&pending.item) {
                Ok(()) => context.accepted.push(pending),
                Err(e) => {
                    let reason = e.to_string();
                    warn!(
                        item = %pending.item.name,
                        section = pending.section.dir_name(),
                        reason = %reason,
                        "Skipping invalid item"
                    );
                    context.report(ProgressEvent::ItemSkipped {
                        name: pending.item.name.clone(),
                        reason: reason.clone(),
                    });
                    context.skipped.push(SkippedItem {
                        name: pending.item.name,
                        section: pending.section,
                        reason,
                    });
                }
            }
        }
        Ok(())
    }
}
