pub mod commands;
pub mod output;

pub use commands::{BuildArgs, CliArgs, Commands, ConfigArgs, LookupArgs, ValidateArgs, WorkspaceArgs};
pub use output::{OutputFormat, OutputFormatter, ValidationOutcome};
