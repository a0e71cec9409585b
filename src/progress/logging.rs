//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, error, info};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { root } => {
                info!(root = %root, "Starting registry build");
            }
            ProgressEvent::AllowListsLoaded { runtime, dev } => {
                debug!(runtime, dev, "Loaded dependency allow-lists");
            }
            ProgressEvent::SourcesDiscovered {
                components,
                examples,
                blocks,
                scan_time,
            } => {
                info!(
                    components,
                    examples,
                    blocks,
                    scan_time_ms = scan_time.as_millis(),
                    "Source discovery complete"
                );
            }
            ProgressEvent::ItemWritten { name, section } => {
                debug!(item = %name, section = section.dir_name(), "Wrote item");
            }
            ProgressEvent::ItemSkipped { name, reason } => {
                debug!(item = %name, reason = %reason, "Item left out of the registry");
            }
            ProgressEvent::Completed {
                written,
                skipped,
                total_time,
            } => {
                info!(
                    written,
                    skipped,
                    total_time_ms = total_time.as_millis(),
                    "Registry build complete"
                );
            }
            ProgressEvent::Failed { error } => {
                error!(error = %error, "Registry build failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputSection;
    use std::time::Duration;

    #[test]
    fn test_logging_handler_all_events() {
        let handler = LoggingHandler;

        handler.on_progress(&ProgressEvent::Started {
            root: "/workspace".to_string(),
        });
        handler.on_progress(&ProgressEvent::AllowListsLoaded { runtime: 4, dev: 1 });
        handler.on_progress(&ProgressEvent::SourcesDiscovered {
            components: 10,
            examples: 3,
            blocks: 2,
            scan_time: Duration::from_millis(5),
        });
        handler.on_progress(&ProgressEvent::ItemWritten {
            name: "orb".to_string(),
            section: OutputSection::Components,
        });
        handler.on_progress(&ProgressEvent::ItemSkipped {
            name: "empty".to_string(),
            reason: "[NonEmptyFiles] item has no files".to_string(),
        });
        handler.on_progress(&ProgressEvent::Completed {
            written: 14,
            skipped: 1,
            total_time: Duration::from_millis(40),
        });
        handler.on_progress(&ProgressEvent::Failed {
            error: "boom".to_string(),
        });
    }
}
