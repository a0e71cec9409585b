// Registry build phases, in execution order.

#[path = "01_scan.rs"]
pub mod scan;
#[path = "02_assemble.rs"]
pub mod assemble;
#[path = "03_validate.rs"]
pub mod validate;
#[path = "04_write.rs"]
pub mod write;

pub use assemble::{to_title, AssemblePhase};
pub use scan::ScanPhase;
pub use validate::ValidatePhase;
pub use write::WritePhase;
