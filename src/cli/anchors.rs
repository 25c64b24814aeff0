// Copyright 2025 Trust Anchors Contributors
// Licensed under GPL-3.0

//! Trust anchor table inspection commands

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::Path;
use trust_anchors::dnssec::parse_name;
use trust_anchors::keytable::{collect_records, KeyTable};

#[derive(Subcommand)]
pub enum AnchorsCommands {
    /// Print every configured trust anchor
    Dump,
    /// Show the anchor configured at exactly NAME
    Find {
        /// Domain name
        name: String,
    },
    /// Check whether NAME requires DNSSEC validation
    Check {
        /// Domain name
        name: String,
    },
}

pub fn execute(command: AnchorsCommands, config: Option<&Path>) -> Result<()> {
    let table = trust_anchors::config::load_keytable(config)
        .context("Failed to load trust anchors")?;

    match command {
        AnchorsCommands::Dump => dump_command(&table),
        AnchorsCommands::Find { name } => find_command(&table, &name),
        AnchorsCommands::Check { name } => check_command(&table, &name),
    }
}

fn dump_command(table: &KeyTable) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    table
        .dump(&mut stdout)
        .context("Failed to write trust anchors")?;
    Ok(())
}

fn find_command(table: &KeyTable, name: &str) -> Result<()> {
    let name = parse_name(name)?;

    let node = match table.find(&name) {
        Ok(node) => node,
        Err(e) if e.is_not_found() => {
            println!("No trust anchor at {}", name);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let status = if !node.is_managed() {
        "static"
    } else if node.is_initial() {
        "managed (initializing)"
    } else {
        "managed"
    };
    println!("Trust anchor: {}", name);
    println!("Status:       {}", status);

    match node.ds_set() {
        Some(mut view) => {
            for ds in collect_records(&mut view) {
                println!("  {} IN DS {}", name, ds);
            }
        }
        None => println!("  (no DS records, secure only)"),
    }

    Ok(())
}

fn check_command(table: &KeyTable, name: &str) -> Result<()> {
    let name = parse_name(name)?;
    let status = table.is_secure_domain(&name);

    match status.matched {
        Some(anchor) if status.want_dnssec => {
            println!("✓ {} is secure (anchor: {})", name, anchor);
        }
        _ => println!("✗ {} is not beneath any trust anchor", name),
    }

    Ok(())
}
