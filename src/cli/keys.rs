// Copyright 2025 Trust Anchors Contributors
// Licensed under GPL-3.0

//! DNSKEY and DS conversion commands

use anyhow::{Context, Result};
use clap::Subcommand;
use hickory_proto::rr::Name;
use trust_anchors::constants::ANCHOR_DIGEST;
use trust_anchors::dnssec::{algorithm_mnemonic, parse_name, Dnskey, DsRecord};

#[derive(Subcommand)]
pub enum KeysCommands {
    /// Compute the DS record for a DNSKEY
    Ds {
        /// Owner name of the key
        name: String,
        /// DNSKEY record data: flags protocol algorithm base64-key
        #[arg(required = true, num_args = 1..)]
        key: Vec<String>,
        /// Digest type (1 = SHA-1, 2 = SHA-256, 4 = SHA-384)
        #[arg(long, default_value_t = ANCHOR_DIGEST)]
        digest: u8,
    },
    /// Check that a DS record authenticates a DNSKEY
    Verify {
        /// Owner name of the key
        name: String,
        /// DS record data: key-tag algorithm digest-type hex-digest
        #[arg(long, required = true, num_args = 4)]
        ds: Vec<String>,
        /// DNSKEY record data: flags protocol algorithm base64-key
        #[arg(required = true, num_args = 1..)]
        key: Vec<String>,
    },
    /// Show the key tag and flags of a DNSKEY
    Tag {
        /// DNSKEY record data: flags protocol algorithm base64-key
        #[arg(required = true, num_args = 1..)]
        key: Vec<String>,
    },
}

pub fn execute(command: KeysCommands) -> Result<()> {
    match command {
        KeysCommands::Ds { name, key, digest } => ds_command(&name, &key.join(" "), digest),
        KeysCommands::Verify { name, ds, key } => {
            verify_command(&name, &ds.join(" "), &key.join(" "))
        }
        KeysCommands::Tag { key } => tag_command(&key.join(" ")),
    }
}

fn ds_command(name: &str, key: &str, digest: u8) -> Result<()> {
    let owner = parse_name(name).context("Invalid owner name")?;
    let key: Dnskey = key.parse().context("Invalid DNSKEY")?;

    let ds = DsRecord::from_dnskey(&owner, &key, digest).context("Failed to compute DS")?;
    println!("{} IN DS {}", owner, ds);

    Ok(())
}

fn verify_command(name: &str, ds: &str, key: &str) -> Result<()> {
    let owner = parse_name(name).context("Invalid owner name")?;
    if ds_authenticates_key(&owner, ds, key)? {
        println!("✓ DS {} authenticates the DNSKEY at {}", ds, owner);
        Ok(())
    } else {
        anyhow::bail!("✗ DS {} does not match the DNSKEY at {}", ds, owner)
    }
}

fn ds_authenticates_key(owner: &Name, ds: &str, key: &str) -> Result<bool> {
    let ds: DsRecord = ds.parse().context("Invalid DS record")?;
    let key: Dnskey = key.parse().context("Invalid DNSKEY")?;
    Ok(ds.matches_key(owner, &key))
}

fn tag_command(key: &str) -> Result<()> {
    let key: Dnskey = key.parse().context("Invalid DNSKEY")?;

    println!("Key tag:   {}", key.key_tag());
    println!("Algorithm: {}", algorithm_mnemonic(key.algorithm));
    println!("Zone key:  {}", if key.is_zone_key() { "yes" } else { "no" });
    println!("SEP:       {}", if key.is_sep() { "yes" } else { "no" });
    println!("Revoked:   {}", if key.is_revoked() { "yes" } else { "no" });

    Ok(())
}
