//! HQMF command-line interface

use clap::{Parser, Subcommand};
use log::LevelFilter;
use octofhir_hqmf::cli::output::{self, ColorMode, OutputFormat};
use octofhir_hqmf::cli::{check, describe, normalize};
use std::path::PathBuf;

/// HQMF command-line tool
#[derive(Parser)]
#[command(name = "hqmf")]
#[command(author, version, about = "HQMF data-criteria tools", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Pretty, global = true)]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Color output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    color: ColorMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a criteria document and write it in canonical form
    Normalize {
        /// Criteria document (JSON)
        file: PathBuf,

        /// Pretty-print output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print a human-readable summary of each data criterion
    Describe {
        /// Criteria document (JSON)
        file: PathBuf,
    },

    /// Check that criteria documents parse
    Check {
        /// Criteria documents to check
        files: Vec<PathBuf>,
    },
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    output::setup_colors(cli.color);

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let result = match cli.command {
        Commands::Normalize { file, pretty } => normalize::normalize(normalize::NormalizeConfig {
            file,
            pretty,
            output_file: cli.output,
        }),

        Commands::Describe { file } => describe::describe(describe::DescribeConfig {
            file,
            format: cli.format,
            output_file: cli.output,
        }),

        Commands::Check { files } => {
            check::check(check::CheckConfig { files }).map(|summary| {
                if !summary.success() {
                    std::process::exit(1);
                }
            })
        }
    };

    if let Err(e) = result {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}
