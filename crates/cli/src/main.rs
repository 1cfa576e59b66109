mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use elif_config_binder::BinderConfig;
use std::path::PathBuf;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "elif-binder")]
#[command(about = "Build-time configuration binding for elif.rs applications")]
#[command(version)]
struct Cli {
    /// Binder settings (YAML); defaults come from ELIF_BINDER_* variables
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the binding pass over a metadata snapshot
    Analyze {
        /// Metadata snapshot (.yaml, .yml or .json)
        snapshot: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
        format: OutputFormat,

        /// Write the build output here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Replay the startup checks of a build output against a property file
    Validate {
        /// Build output produced by `analyze --format json`
        build_output: PathBuf,

        /// Flat YAML map of property values
        #[arg(long)]
        properties: PathBuf,

        /// Extra type converted implicitly from its string form (repeatable)
        #[arg(long = "known-type")]
        known_types: Vec<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Summary,
}

fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(Layer::new().with_writer(std::io::stderr))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => BinderConfig::from_file(path)?,
        None => BinderConfig::from_env()?,
    };
    init_logging(&config.log_level)?;

    match cli.command {
        Commands::Analyze {
            snapshot,
            format,
            output,
        } => commands::analyze::run(config, &snapshot, format, output.as_deref()),
        Commands::Validate {
            build_output,
            properties,
            known_types,
        } => commands::validate::run(&build_output, &properties, &known_types),
    }
}
