// Copyright 2025 Trust Anchors Contributors
// Licensed under GPL-3.0

//! Trust anchor configuration file

use crate::constants::{ANCHOR_DIGEST, ROOT_ANCHORS};
use crate::dnssec::{parse_name, Dnskey, DsRecord};
use crate::keytable::KeyTable;
use anyhow::{Context, Result};
use hickory_proto::rr::Name;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a configured anchor is trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorKind {
    StaticDs,
    StaticKey,
    InitialDs,
    InitialKey,
    ManagedDs,
    ManagedKey,
}

impl AnchorKind {
    /// `(managed, initial)` status bits for the key table
    pub fn status(self) -> (bool, bool) {
        match self {
            Self::StaticDs | Self::StaticKey => (false, false),
            Self::InitialDs | Self::InitialKey => (true, true),
            Self::ManagedDs | Self::ManagedKey => (true, false),
        }
    }

    /// Whether the entry's data is a DNSKEY rather than a DS
    pub fn is_key(self) -> bool {
        matches!(self, Self::StaticKey | Self::InitialKey | Self::ManagedKey)
    }
}

/// One configured trust anchor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnchorEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AnchorKind,
    /// DS or DNSKEY record data in presentation form
    pub data: String,
}

impl AnchorEntry {
    /// DS record for this entry, or `None` when a key must be skipped
    ///
    /// DNSKEY entries are converted with SHA-256.
    fn to_ds(&self, owner: &Name) -> Result<Option<DsRecord>> {
        if !self.kind.is_key() {
            let ds = self
                .data
                .parse::<DsRecord>()
                .with_context(|| format!("Invalid DS for trust anchor {}", self.name))?;
            return Ok(Some(ds));
        }

        let key = self
            .data
            .parse::<Dnskey>()
            .with_context(|| format!("Invalid DNSKEY for trust anchor {}", self.name))?;

        if !key.is_zone_key() {
            tracing::warn!(
                "Skipping trust anchor {}/{}: not a zone key",
                owner,
                key.key_tag()
            );
            return Ok(None);
        }
        if key.is_revoked() {
            tracing::warn!(
                "Skipping trust anchor {}/{}: key is revoked",
                owner,
                key.key_tag()
            );
            return Ok(None);
        }

        let ds = DsRecord::from_dnskey(owner, &key, ANCHOR_DIGEST)
            .with_context(|| format!("Failed to compute DS for trust anchor {}", self.name))?;
        Ok(Some(ds))
    }
}

/// Counts from applying a configuration to a key table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub anchors: usize,
    pub secure_domains: usize,
    pub skipped: usize,
}

fn default_include_root() -> bool {
    true
}

/// Contents of an anchor configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnchorConfig {
    /// Add the built-in root anchors unless the root is configured explicitly
    #[serde(default = "default_include_root")]
    pub include_root: bool,
    #[serde(default)]
    pub trust_anchors: Vec<AnchorEntry>,
    /// Names marked secure without key material
    #[serde(default)]
    pub secure_domains: Vec<String>,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            include_root: true,
            trust_anchors: Vec::new(),
            secure_domains: Vec::new(),
        }
    }
}

impl AnchorConfig {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse trust anchor configuration")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&json).with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Issue the `add` and `mark_secure` calls this configuration describes
    pub fn apply(&self, table: &KeyTable) -> Result<LoadSummary> {
        let mut summary = LoadSummary::default();
        let mut root_configured = false;

        for entry in &self.trust_anchors {
            let name = parse_name(&entry.name)
                .with_context(|| format!("Invalid trust anchor name '{}'", entry.name))?;
            root_configured |= name.is_root();

            let Some(ds) = entry.to_ds(&name)? else {
                summary.skipped += 1;
                continue;
            };

            let (managed, initial) = entry.kind.status();
            table
                .add(&name, managed, initial, Some(ds))
                .with_context(|| format!("Failed to add trust anchor {}", name))?;
            summary.anchors += 1;
        }

        if self.include_root && !root_configured {
            for text in ROOT_ANCHORS {
                let ds: DsRecord = text.parse().context("Invalid built-in root anchor")?;
                table
                    .add(&Name::root(), true, true, Some(ds))
                    .context("Failed to add built-in root anchor")?;
                summary.anchors += 1;
            }
        }

        for domain in &self.secure_domains {
            let name = parse_name(domain)
                .with_context(|| format!("Invalid secure domain '{}'", domain))?;
            table
                .mark_secure(&name)
                .with_context(|| format!("Failed to mark {} secure", name))?;
            summary.secure_domains += 1;
        }

        tracing::info!(
            "Loaded {} trust anchor(s), {} secure domain(s), {} skipped",
            summary.anchors,
            summary.secure_domains,
            summary.skipped
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // 03 01 00 01 de ad be ef
    const KEY_B64: &str = "AwEAAd6tvu8=";

    fn name(s: &str) -> Name {
        parse_name(s).unwrap()
    }

    #[test]
    fn test_parse_defaults() {
        let config = AnchorConfig::parse("{}").unwrap();
        assert!(config.include_root);
        assert!(config.trust_anchors.is_empty());
        assert!(config.secure_domains.is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        let json = r#"{"trust_anchors": [{"name": "a.", "type": "bogus", "data": ""}]}"#;
        assert!(AnchorConfig::parse(json).is_err());
    }

    #[test]
    fn test_kind_status() {
        assert_eq!(AnchorKind::StaticDs.status(), (false, false));
        assert_eq!(AnchorKind::InitialKey.status(), (true, true));
        assert_eq!(AnchorKind::ManagedDs.status(), (true, false));
    }

    #[test]
    fn test_default_adds_root_anchors() {
        let table = KeyTable::new();
        let summary = AnchorConfig::default().apply(&table).unwrap();
        assert_eq!(summary.anchors, ROOT_ANCHORS.len());

        let root = table.find(&Name::root()).unwrap();
        assert_eq!(root.ds_count(), ROOT_ANCHORS.len());
        assert!(root.is_initial());
        assert!(table.is_secure_domain(&name("www.example.com.")).want_dnssec);
    }

    #[test]
    fn test_explicit_root_replaces_builtin() {
        let json = r#"{
            "trust_anchors": [
                {"name": ".", "type": "static-ds",
                 "data": "20326 8 2 E06D44B80B8F1D39A95C0B0D7C65D08458E880409BBC683457104237C7F8EC8D"}
            ]
        }"#;
        let table = KeyTable::new();
        AnchorConfig::parse(json).unwrap().apply(&table).unwrap();

        let root = table.find(&Name::root()).unwrap();
        assert_eq!(root.ds_count(), 1);
        assert!(!root.is_managed());
    }

    #[test]
    fn test_apply_entries() {
        let json = format!(
            r#"{{
                "include_root": false,
                "trust_anchors": [
                    {{"name": "example.com", "type": "initial-key", "data": "257 3 8 {key}"}},
                    {{"name": "example.net.", "type": "managed-ds",
                      "data": "12345 13 2 {digest}"}},
                    {{"name": "zsk.example.", "type": "static-key", "data": "0 3 8 {key}"}},
                    {{"name": "revoked.example.", "type": "static-key", "data": "385 3 8 {key}"}}
                ],
                "secure_domains": ["sub.example.org."]
            }}"#,
            key = KEY_B64,
            digest = "AB".repeat(32)
        );

        let table = KeyTable::new();
        let summary = AnchorConfig::parse(&json).unwrap().apply(&table).unwrap();
        assert_eq!(
            summary,
            LoadSummary {
                anchors: 2,
                secure_domains: 1,
                skipped: 2
            }
        );
        assert!(table.find(&Name::root()).is_err());

        let node = table.find(&name("example.com.")).unwrap();
        assert!(node.is_managed());
        assert!(node.is_initial());

        let net = table.find(&name("example.net.")).unwrap();
        assert!(net.is_managed());
        assert!(!net.is_initial());
        assert_eq!(net.ds_records()[0].key_tag, 12345);

        assert!(table.find(&name("sub.example.org.")).unwrap().is_null());
        assert!(table.find(&name("zsk.example.")).is_err());
        assert!(table.find(&name("revoked.example.")).is_err());

        // The same DNSKEY removes the DS the loader derived from it
        let key: Dnskey = format!("257 3 8 {}", KEY_B64).parse().unwrap();
        table.delete_ds(&name("example.com."), &key).unwrap();
        assert!(table.find(&name("example.com.")).unwrap().is_null());
    }

    #[test]
    fn test_apply_rejects_bad_ds() {
        let json = r#"{"trust_anchors": [{"name": "a.", "type": "static-ds", "data": "1 8 2 ABCD"}]}"#;
        let table = KeyTable::new();
        assert!(AnchorConfig::parse(json).unwrap().apply(&table).is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"include_root": false, "secure_domains": ["example.", "example.org."]}}"#
        )
        .unwrap();

        let config = AnchorConfig::from_file(file.path()).unwrap();
        assert!(!config.include_root);
        assert_eq!(config.secure_domains.len(), 2);
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AnchorConfig::from_file(&dir.path().join("missing.json")).is_err());
    }
}
