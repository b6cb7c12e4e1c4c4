// artsift - Originality screening for artwork uploads
// Copyright (C) 2026 artsift Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

mod commands;
mod context;
mod output;
mod progress;

use anyhow::Result;
use artsift_observability::{init_tracing_with_config, verbosity_level, LogConfig, LogFormat};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use commands::*;
use context::{load_config, AppContext};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "artsift")]
#[command(version, about = "Originality screening for artwork uploads")]
#[command(
    long_about = "artsift fingerprints images, finds near-duplicates in an indexed corpus,
compares visual features and flags likely screen captures."
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print results and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file (defaults to ./artsift.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(
        long,
        global = true,
        value_name = "FORMAT",
        value_parser = ["pretty", "compact", "json"]
    )]
    log_format: Option<String>,

    /// Colored output (always|auto|never)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print perceptual fingerprints
    Hash(HashCmd),

    /// Compare two images
    Compare(CompareCmd),

    /// Check whether an image is a screen capture
    Screenshot(ScreenshotCmd),

    /// Build a fingerprint corpus from a directory
    Index(IndexCmd),

    /// Find near-duplicates in a corpus
    Match(MatchCmd),

    /// Full analysis report as JSON
    Analyze(AnalyzeCmd),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.color.as_str() {
        "never" => console::set_colors_enabled(false),
        "always" => console::set_colors_enabled(true),
        "auto" => {}
        _ => {
            output::error(&format!("Invalid color option: {}", cli.color));
            std::process::exit(2);
        }
    }

    if let Commands::Completions { shell } = cli.command {
        generate_completions(shell);
        return Ok(());
    }

    let result = run(cli).await;

    if let Err(e) = result {
        output::error(&format!("Error: {:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref()).await?;

    let format: LogFormat = match &cli.log_format {
        Some(format) => format.parse()?,
        None => config.observability.log_format.parse()?,
    };
    let level = verbosity_level(cli.verbose, cli.quiet, &config.observability.log_level);
    let log_config = LogConfig::new()
        .with_format(format)
        .with_level(level)
        .with_color(config.observability.color && console::colors_enabled_stderr());
    if let Err(e) = init_tracing_with_config(log_config) {
        output::warning(&format!("Logging disabled: {}", e));
    }

    let ctx = AppContext::new(config, cli.quiet);

    match cli.command {
        Commands::Hash(cmd) => cmd.execute(&ctx).await,
        Commands::Compare(cmd) => cmd.execute(&ctx).await,
        Commands::Screenshot(cmd) => cmd.execute(&ctx).await,
        Commands::Index(cmd) => cmd.execute(&ctx).await,
        Commands::Match(cmd) => cmd.execute(&ctx).await,
        Commands::Analyze(cmd) => cmd.execute(&ctx).await,
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    }
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "artsift", &mut io::stdout());
}
