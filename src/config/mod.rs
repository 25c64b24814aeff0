// Copyright 2025 Trust Anchors Contributors
// Licensed under GPL-3.0

//! Loading trust anchors from configuration

pub mod anchors;

pub use anchors::{AnchorConfig, AnchorEntry, AnchorKind, LoadSummary};

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::keytable::KeyTable;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Get the default anchor configuration file path
pub fn default_config_path() -> Result<PathBuf> {
    let base = directories::BaseDirs::new().context("Failed to determine home directory")?;

    Ok(base
        .config_dir()
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME))
}

/// Build a key table from `path`, or from the default file if it exists
///
/// With no file at all, the table holds only the built-in root anchors.
pub fn load_keytable(path: Option<&Path>) -> Result<Arc<KeyTable>> {
    let config = match path {
        Some(path) => AnchorConfig::from_file(path)?,
        None => match default_config_path() {
            Ok(default) if default.exists() => AnchorConfig::from_file(&default)?,
            _ => {
                tracing::info!("No trust anchor configuration found, using built-in root anchors");
                AnchorConfig::default()
            }
        },
    };

    let table = KeyTable::new();
    config.apply(&table)?;
    Ok(table)
}
