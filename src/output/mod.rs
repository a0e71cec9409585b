//! Registry JSON documents and the writer that persists them

pub mod schema;
pub mod writer;

pub use schema::{AssetFile, ItemSummary, RegistryIndex, RegistryItem, RegistryType};
pub use writer::{OutputSection, OutputWriter, WrittenItem, INDEX_FILE};
