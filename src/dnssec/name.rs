// Copyright 2025 Trust Anchors Contributors
// Licensed under GPL-3.0

//! Domain name helpers

use crate::error::{KeytableError, Result};
use hickory_proto::rr::Name;
use std::borrow::Cow;

/// Parse a domain name from presentation form, always as an absolute name
pub fn parse_name(text: &str) -> Result<Name> {
    let name = Name::from_ascii(text.trim())
        .map_err(|e| KeytableError::InvalidName(format!("{}: {}", text, e)))?;
    Ok(to_absolute(&name).into_owned())
}

/// Treat `name` as fully qualified
pub fn to_absolute(name: &Name) -> Cow<'_, Name> {
    if name.is_fqdn() {
        Cow::Borrowed(name)
    } else {
        let mut absolute = name.clone();
        absolute.set_fqdn(true);
        Cow::Owned(absolute)
    }
}

/// Canonical (lowercase, uncompressed) wire form of `name`, as hashed into a DS digest
pub fn canonical_wire(name: &Name) -> Vec<u8> {
    let lower = name.to_lowercase();
    let mut wire = Vec::new();

    for label in lower.iter() {
        wire.push(label.len() as u8);
        wire.extend_from_slice(label);
    }
    wire.push(0);

    wire
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_is_absolute() {
        let name = parse_name("example.com").unwrap();
        assert!(name.is_fqdn());
        assert_eq!(name.to_string(), "example.com.");
    }

    #[test]
    fn test_parse_name_rejects_garbage() {
        let label = "a".repeat(64);
        let err = parse_name(&format!("{}.com.", label)).unwrap_err();
        assert!(matches!(err, KeytableError::InvalidName(_)));
    }

    #[test]
    fn test_canonical_wire_lowercases() {
        let name = parse_name("ExAmple.COM.").unwrap();
        assert_eq!(
            canonical_wire(&name),
            b"\x07example\x03com\x00".to_vec()
        );
    }

    #[test]
    fn test_canonical_wire_root() {
        assert_eq!(canonical_wire(&Name::root()), vec![0u8]);
    }
}
