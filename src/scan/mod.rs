//! Source discovery
//!
//! Walks the component, example and block trees and turns every source file
//! into an [`AssetFile`](crate::output::AssetFile) ready for analysis.

mod assets;
mod block_meta;
mod walker;

pub use assets::{group_of, sanitize_slug, SourceDiscovery};
pub use block_meta::{BlockMeta, BlockMetaError, BlockMetaTable, MobileMode, BLOCK_META_FILE};
pub use walker::{list_files, list_subdirs, relative_posix, walk_source_files, SOURCE_EXTENSIONS};
