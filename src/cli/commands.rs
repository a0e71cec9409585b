use crate::config::RegistryConfig;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Static component registry builder for Vue UI libraries
#[derive(Parser, Debug)]
#[command(
    name = "uiregistry",
    about = "Static component registry builder for Vue UI libraries",
    version,
    long_about = "uiregistry walks a component library workspace, classifies each item's \
                  imports into npm dependencies and registry references, and writes a static \
                  JSON registry (index.json plus one descriptor per item) for installer CLIs \
                  and documentation sites."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(
        short = 'v',
        long,
        global = true,
        action = ArgAction::Count,
        help = "Increase verbosity (can be used multiple times)"
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Build the registry",
        long_about = "Regenerates the output directory: one descriptor per component group, \
                      example and block, plus index.json.\n\n\
                      Examples:\n  \
                      uiregistry build\n  \
                      uiregistry build --root ../ui --output dist/registry\n  \
                      uiregistry build --format json"
    )]
    Build(BuildArgs),

    #[command(
        about = "Resolve a name against a built registry",
        long_about = "Prints what the registry endpoint serves for a name: the index for \
                      'registry' or 'all', otherwise the matching item with its registry \
                      dependencies rewritten against --origin.\n\n\
                      Examples:\n  \
                      uiregistry lookup orb\n  \
                      uiregistry lookup example-orb.json --origin http://localhost:3000"
    )]
    Lookup(LookupArgs),

    #[command(
        about = "Validate an item descriptor",
        long_about = "Runs the item validation rules over a descriptor JSON file and exits \
                      with status 1 when any rule fails.\n\n\
                      Examples:\n  \
                      uiregistry validate registry/components/orb.json"
    )]
    Validate(ValidateArgs),

    #[command(about = "Show the effective configuration")]
    Config(ConfigArgs),
}

/// Workspace location and registry identity, overriding `REGISTRY_*` settings
#[derive(Parser, Debug, Clone, Default)]
pub struct WorkspaceArgs {
    #[arg(long, value_name = "DIR", help = "Workspace root containing packages/")]
    pub root: Option<PathBuf>,

    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        help = "Output directory (relative to the root unless absolute)"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, value_name = "URL", help = "Public base URL of the registry")]
    pub base_url: Option<String>,

    #[arg(long, value_name = "SLUG", help = "Library namespace under components/")]
    pub library: Option<String>,
}

impl WorkspaceArgs {
    pub fn apply(&self, mut config: RegistryConfig) -> RegistryConfig {
        if let Some(root) = &self.root {
            config.root_dir = root.clone();
        }
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(library) = &self.library {
            config.library_slug = library.clone();
        }
        config
    }
}

#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Report format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct LookupArgs {
    #[arg(value_name = "NAME", help = "Item name, 'registry' or 'all' (.json optional)")]
    pub name: String,

    #[arg(
        long,
        value_name = "URL",
        help = "Origin the request came from (defaults to the base URL)"
    )]
    pub origin: Option<String>,

    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "json",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(value_name = "FILE", help = "Item descriptor to validate")]
    pub file: PathBuf,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
