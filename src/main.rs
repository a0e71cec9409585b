use uiregistry::cli::commands::{
    BuildArgs, CliArgs, Commands, ConfigArgs, LookupArgs, ValidateArgs, WorkspaceArgs,
};
use uiregistry::cli::output::{OutputFormatter, ValidationOutcome};
use uiregistry::fs::{FileSystem, RealFileSystem};
use uiregistry::imports::OxcImportExtractor;
use uiregistry::lookup::RegistryLookup;
use uiregistry::output::RegistryItem;
use uiregistry::pipeline::RegistryBuilder;
use uiregistry::progress::LoggingHandler;
use uiregistry::util::logging::{config_from_env, init_logging, LoggingConfig};
use uiregistry::validation::Validator;
use uiregistry::{ConfigError, RegistryConfig, VERSION};

use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("uiregistry v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Build(build_args) => handle_build(build_args),
        Commands::Lookup(lookup_args) => handle_lookup(lookup_args),
        Commands::Validate(validate_args) => handle_validate(validate_args),
        Commands::Config(config_args) => handle_config(config_args),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let env_config = config_from_env();
    let mut config = if args.log_level.is_some() || args.verbose > 0 || args.quiet {
        LoggingConfig::from_flags(args.log_level.as_deref(), args.verbose, args.quiet)
    } else {
        env_config.clone()
    };
    config.use_json = args.log_json || env_config.use_json;
    if args.verbose > 1 {
        config = config.detailed();
    }
    init_logging(config);
}

fn load_config(workspace: &WorkspaceArgs) -> Result<RegistryConfig, ConfigError> {
    let config = workspace.apply(RegistryConfig::default());
    config.validate()?;
    Ok(config)
}

fn print_output(result: anyhow::Result<String>) -> i32 {
    match result {
        Ok(output) => {
            println!("{}", output.trim_end());
            0
        }
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            1
        }
    }
}

fn handle_build(args: &BuildArgs) -> i32 {
    let config = match load_config(&args.workspace) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return 1;
        }
    };

    let fs = RealFileSystem::new();
    let extractor = OxcImportExtractor;
    let handler = LoggingHandler;

    let report = match RegistryBuilder::new(&fs, &config, &extractor)
        .with_progress(&handler)
        .build()
    {
        Ok(report) => report,
        Err(e) => {
            error!("Registry build failed: {:#}", e);
            return 1;
        }
    };

    info!(
        output = %report.output_dir.display(),
        items = report.written.len(),
        "Registry assets generated"
    );
    print_output(OutputFormatter::new(args.format.into()).format_report(&report))
}

fn handle_lookup(args: &LookupArgs) -> i32 {
    let config = match load_config(&args.workspace) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return 1;
        }
    };

    let origin = args.origin.clone().unwrap_or_else(|| config.base_url.clone());
    let fs = RealFileSystem::new();
    let response = RegistryLookup::new(&fs, &config).resolve(&args.name, &origin);

    let code = print_output(OutputFormatter::new(args.format.into()).format_lookup(&response));
    if code == 0 && !response.is_found() {
        return 1;
    }
    code
}

fn handle_validate(args: &ValidateArgs) -> i32 {
    let fs = RealFileSystem::new();
    let content = match fs.read_to_string(&args.file) {
        Ok(content) => content,
        Err(e) => {
            error!("{:#}", e);
            return 1;
        }
    };

    let item: RegistryItem = match serde_json::from_str(&content) {
        Ok(item) => item,
        Err(e) => {
            error!("{} is not a registry item: {}", args.file.display(), e);
            return 1;
        }
    };

    let violations = Validator::new().violations(&item);
    let outcome = ValidationOutcome::new(args.file.clone(), item.name, violations);

    let code = print_output(OutputFormatter::new(args.format.into()).format_validation(&outcome));
    if code == 0 && !outcome.valid {
        return 1;
    }
    code
}

fn handle_config(args: &ConfigArgs) -> i32 {
    let config = match load_config(&args.workspace) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return 1;
        }
    };
    print_output(OutputFormatter::new(args.format.into()).format_config(&config))
}
