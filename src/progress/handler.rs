//! Progress handler trait and events

use crate::output::OutputSection;
use std::time::Duration;

/// Events emitted while a registry is built
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Build started
    Started { root: String },

    /// Dependency allow-lists loaded from the manifests
    AllowListsLoaded { runtime: usize, dev: usize },

    /// Source trees walked
    SourcesDiscovered {
        components: usize,
        examples: usize,
        blocks: usize,
        scan_time: Duration,
    },

    /// Item descriptor written
    ItemWritten { name: String, section: OutputSection },

    /// Item failed validation and was left out
    ItemSkipped { name: String, reason: String },

    /// Build completed successfully
    Completed {
        written: usize,
        skipped: usize,
        total_time: Duration,
    },

    /// Build failed
    Failed { error: String },
}

/// Trait for handling progress events during a build
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}
