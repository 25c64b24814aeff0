// Copyright 2025 Trust Anchors Contributors
// Licensed under GPL-3.0

//! Delegation Signer records: digest computation, comparison and formatting

use crate::constants::{DIGEST_SHA1, DIGEST_SHA256, DIGEST_SHA384};
use crate::dnssec::dnskey::{next_number, Dnskey};
use crate::dnssec::name::canonical_wire;
use crate::error::{KeytableError, Result};
use hickory_proto::rr::Name;
use ring::digest;
use std::fmt;
use std::str::FromStr;

/// DS record data (RFC 4034 section 5)
///
/// Two records are the same anchor when all four fields are equal; the
/// derived `PartialEq` is the structural comparison used for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DsRecord {
    pub key_tag: u16,
    pub algorithm: u8,
    pub digest_type: u8,
    pub digest: Vec<u8>,
}

impl DsRecord {
    pub fn new(key_tag: u16, algorithm: u8, digest_type: u8, digest: Vec<u8>) -> Self {
        Self {
            key_tag,
            algorithm,
            digest_type,
            digest,
        }
    }

    /// Compute the DS for `key` owned by `owner`
    ///
    /// digest = H(canonical owner name | DNSKEY rdata)
    pub fn from_dnskey(owner: &Name, key: &Dnskey, digest_type: u8) -> Result<Self> {
        let algorithm = digest_algorithm(digest_type)?;

        let mut ctx = digest::Context::new(algorithm);
        ctx.update(&canonical_wire(owner));
        ctx.update(&key.rdata());
        let digest = ctx.finish().as_ref().to_vec();

        Ok(Self::new(key.key_tag(), key.algorithm, digest_type, digest))
    }

    /// Whether this DS authenticates `key` at `owner`
    pub fn matches_key(&self, owner: &Name, key: &Dnskey) -> bool {
        if self.key_tag != key.key_tag() || self.algorithm != key.algorithm {
            return false;
        }
        match Self::from_dnskey(owner, key, self.digest_type) {
            Ok(computed) => computed.digest == self.digest,
            Err(_) => false,
        }
    }
}

fn digest_algorithm(digest_type: u8) -> Result<&'static digest::Algorithm> {
    match digest_type {
        DIGEST_SHA1 => Ok(&digest::SHA1_FOR_LEGACY_USE_ONLY),
        DIGEST_SHA256 => Ok(&digest::SHA256),
        DIGEST_SHA384 => Ok(&digest::SHA384),
        other => Err(KeytableError::UnsupportedDigest(other)),
    }
}

/// Expected digest length for a known digest type
fn digest_len(digest_type: u8) -> Option<usize> {
    match digest_type {
        DIGEST_SHA1 => Some(20),
        DIGEST_SHA256 => Some(32),
        DIGEST_SHA384 => Some(48),
        _ => None,
    }
}

impl FromStr for DsRecord {
    type Err = KeytableError;

    /// Parse `<key tag> <algorithm> <digest type> <hex digest>`
    fn from_str(s: &str) -> Result<Self> {
        let mut fields = s.split_whitespace();

        let key_tag: u16 = next_number(&mut fields, "key tag")?;
        let algorithm: u8 = next_number(&mut fields, "algorithm")?;
        let digest_type: u8 = next_number(&mut fields, "digest type")?;

        let encoded: String = fields.collect();
        if encoded.is_empty() {
            return Err(KeytableError::Parse("missing DS digest".to_string()));
        }
        let digest = hex::decode(&encoded)
            .map_err(|e| KeytableError::Parse(format!("invalid DS digest: {}", e)))?;

        if let Some(expected) = digest_len(digest_type) {
            if digest.len() != expected {
                return Err(KeytableError::Parse(format!(
                    "DS digest type {} needs {} bytes, got {}",
                    digest_type,
                    expected,
                    digest.len()
                )));
            }
        }

        Ok(Self::new(key_tag, algorithm, digest_type, digest))
    }
}

impl fmt::Display for DsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.key_tag,
            self.algorithm,
            self.digest_type,
            hex::encode_upper(&self.digest)
        )
    }
}
