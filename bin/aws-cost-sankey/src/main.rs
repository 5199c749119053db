//! AWS Cost Sankey CLI
//!
//! Fetches AWS billing data and renders it as a text edge list or an
//! interactive Sankey chart, optionally with an LLM cost analysis.

use anyhow::Result;
use aws_cost_sankey::commands::{
    display_version, execute_generate, validate_args, validate_dump_file, GenerateArgs,
    OutputFormat,
};
use aws_cost_sankey::source::CategoryDimension;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

/// AWS Cost Sankey - where does the AWS bill go
#[derive(Parser, Debug)]
#[command(name = "aws-cost-sankey")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate costs and write a text dump or Sankey chart
    Generate {
        /// Path to the config file (YAML, or TOML with a .toml suffix)
        #[arg(short, long, default_value = "configs/configs.yaml")]
        config: PathBuf,

        /// Name of the output file, the suffix is picked by format
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Chart)]
        format: OutputFormat,

        /// Show usage types instead of services
        #[arg(short, long)]
        dev: bool,

        /// Read costs from a text dump instead of querying Cost Explorer
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print a cost breakdown to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a text dump file
    Validate {
        /// Path to the dump file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Generate {
            config,
            output,
            format,
            dev,
            input,
            summary,
        } => {
            let args = GenerateArgs {
                config_path: config,
                output_stem: output,
                format,
                dimension: if dev {
                    CategoryDimension::UsageType
                } else {
                    CategoryDimension::Service
                },
                input,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_generate(args)?;
        }

        Commands::Validate { file } => {
            validate_dump_file(file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
