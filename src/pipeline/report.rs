use crate::output::{OutputSection, WrittenItem};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// An item left out of the registry because it failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedItem {
    pub name: String,
    pub section: OutputSection,
    pub reason: String,
}

/// Summary of a finished build
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub index_path: PathBuf,
    pub written: Vec<WrittenItem>,
    pub skipped: Vec<SkippedItem>,
    #[serde(serialize_with = "serialize_millis", rename = "duration_ms")]
    pub duration: Duration,
}

impl BuildReport {
    pub fn written_in(&self, section: OutputSection) -> usize {
        self.written.iter().filter(|w| w.section == section).count()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}
