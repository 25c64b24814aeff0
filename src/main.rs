// Copyright 2025 Trust Anchors Contributors
// Licensed under GPL-3.0

//! Trust anchor CLI application

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "trust-anchors")]
#[command(about = "Inspect DNSSEC trust anchors and compute DS records", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Trust anchor configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Trust anchor table inspection
    Anchors {
        #[command(subcommand)]
        command: cli::anchors::AnchorsCommands,
    },
    /// DNSKEY and DS conversion
    Keys {
        #[command(subcommand)]
        command: cli::keys::KeysCommands,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Without -v: only WARN and ERROR from trust_anchors
    // With -v: INFO from trust_anchors
    // With RUST_LOG set: whatever it asks for
    if std::env::var("RUST_LOG").is_err() {
        use tracing_subscriber::EnvFilter;

        let filter = if cli.verbose {
            EnvFilter::new("trust_anchors=info")
        } else {
            EnvFilter::new("trust_anchors=warn")
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Anchors { command } => {
            cli::anchors::execute(command, cli.config.as_deref())?;
        }
        Commands::Keys { command } => {
            cli::keys::execute(command)?;
        }
    }

    Ok(())
}
