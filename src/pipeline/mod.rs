//! Build pipeline
//!
//! A registry build runs four phases over a shared [`BuildContext`]:
//! scan the sources, assemble items, validate them, write the output tree.

pub mod context;
pub mod orchestrator;
pub mod phase_trait;
pub mod phases;
pub mod report;

pub use context::{BuildContext, PendingItem};
pub use orchestrator::RegistryBuilder;
pub use phase_trait::BuildPhase;
pub use report::{BuildReport, SkippedItem};
