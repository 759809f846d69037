use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{Parser, Subcommand};
use theme_tokens::{build_token_sets, discover_token_sets};
use theme_tokens_core::{build_platform, BuildConfig, Registry};
use tracing::{debug, error, info};

/// Compile design tokens into CSS custom properties and SCSS mixins
#[derive(Parser)]
#[command(name = "theme-tokens")]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build token sets, or every platform of a config file
    Build {
        /// Token set names; defaults to every JSON file in the tokens directory
        sets: Vec<String>,

        /// Directory holding `<set>.json` token files
        #[arg(long, default_value = "tokens")]
        tokens: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "output")]
        out: PathBuf,

        /// Build configuration file; replaces the per-set defaults
        #[arg(short, long, conflicts_with_all = ["sets", "tokens", "out"])]
        config: Option<PathBuf>,
    },
    /// List registered transforms and formats
    List,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .init();
    debug!("theme-tokens started with verbosity level: {}", cli.verbose);

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<bool> {
    let registry = Registry::with_builtins();
    match command {
        Commands::Build {
            config: Some(config),
            ..
        } => {
            let config = BuildConfig::from_path(&config)?;
            for platform in config.platforms.keys() {
                build_platform(&registry, &config, platform)?;
            }
            Ok(true)
        }
        Commands::Build {
            sets,
            tokens,
            out,
            config: None,
        } => {
            let sets = if sets.is_empty() {
                discover_token_sets(&tokens)?
            } else {
                sets
            };
            info!("Build started...");
            let report = build_token_sets(&registry, &sets, &tokens, &out);
            info!(
                files = report.written.len(),
                failed = report.failed.len(),
                "Build completed"
            );
            Ok(report.is_success())
        }
        Commands::List => {
            println!("transforms:");
            for name in registry.transform_names() {
                println!("  {name}");
            }
            println!("formats:");
            for name in registry.format_names() {
                println!("  {name}");
            }
            Ok(true)
        }
    }
}
