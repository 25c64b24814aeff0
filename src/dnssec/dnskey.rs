// Copyright 2025 Trust Anchors Contributors
// Licensed under GPL-3.0

//! DNSKEY record data and key tag computation

use crate::constants::{DNSKEY_FLAG_REVOKE, DNSKEY_FLAG_SEP, DNSKEY_FLAG_ZONE};
use crate::error::{KeytableError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// DNSKEY record data (RFC 4034 section 2)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dnskey {
    pub flags: u16,
    pub protocol: u8,
    pub algorithm: u8,
    pub public_key: Vec<u8>,
}

impl Dnskey {
    pub fn new(flags: u16, protocol: u8, algorithm: u8, public_key: Vec<u8>) -> Self {
        Self {
            flags,
            protocol,
            algorithm,
            public_key,
        }
    }

    /// Uncompressed rdata: flags, protocol, algorithm, public key
    pub fn rdata(&self) -> Vec<u8> {
        let mut rdata = Vec::with_capacity(4 + self.public_key.len());
        rdata.extend_from_slice(&self.flags.to_be_bytes());
        rdata.push(self.protocol);
        rdata.push(self.algorithm);
        rdata.extend_from_slice(&self.public_key);
        rdata
    }

    /// Key tag as defined in RFC 4034 Appendix B
    pub fn key_tag(&self) -> u16 {
        // RSA/MD5 keys use the low bits of the modulus instead
        if self.algorithm == 1 {
            let key = &self.public_key;
            if key.len() < 3 {
                return 0;
            }
            return u16::from_be_bytes([key[key.len() - 3], key[key.len() - 2]]);
        }

        let mut ac: u32 = 0;
        for (i, byte) in self.rdata().iter().enumerate() {
            if i & 1 == 1 {
                ac += u32::from(*byte);
            } else {
                ac += u32::from(*byte) << 8;
            }
        }
        ac += (ac >> 16) & 0xffff;
        (ac & 0xffff) as u16
    }

    pub fn is_zone_key(&self) -> bool {
        self.flags & DNSKEY_FLAG_ZONE != 0
    }

    pub fn is_sep(&self) -> bool {
        self.flags & DNSKEY_FLAG_SEP != 0
    }

    /// REVOKE bit set (RFC 5011 section 3)
    pub fn is_revoked(&self) -> bool {
        self.flags & DNSKEY_FLAG_REVOKE != 0
    }
}

impl FromStr for Dnskey {
    type Err = KeytableError;

    /// Parse `<flags> <protocol> <algorithm> <base64 key>`; the key may be
    /// split across whitespace as in zone files
    fn from_str(s: &str) -> Result<Self> {
        let mut fields = s.split_whitespace();

        let flags: u16 = next_number(&mut fields, "flags")?;
        let protocol: u8 = next_number(&mut fields, "protocol")?;
        let algorithm: u8 = next_number(&mut fields, "algorithm")?;

        let encoded: String = fields.collect();
        if encoded.is_empty() {
            return Err(KeytableError::Parse("missing DNSKEY public key".to_string()));
        }
        let public_key = STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| KeytableError::Parse(format!("invalid DNSKEY base64: {}", e)))?;

        Ok(Self::new(flags, protocol, algorithm, public_key))
    }
}

impl fmt::Display for Dnskey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.flags,
            self.protocol,
            self.algorithm,
            STANDARD.encode(&self.public_key)
        )
    }
}

/// Parse the next whitespace-separated field as a number
pub(crate) fn next_number<'a, T: FromStr>(
    fields: &mut impl Iterator<Item = &'a str>,
    what: &str,
) -> Result<T> {
    let field = fields
        .next()
        .ok_or_else(|| KeytableError::Parse(format!("missing {}", what)))?;
    field
        .parse()
        .map_err(|_| KeytableError::Parse(format!("invalid {}: {}", what, field)))
}

/// Mnemonic for a DNSSEC algorithm number, or the number itself
pub fn algorithm_mnemonic(algorithm: u8) -> Cow<'static, str> {
    let name = match algorithm {
        1 => "RSAMD5",
        3 => "DSA",
        5 => "RSASHA1",
        6 => "NSEC3DSA",
        7 => "NSEC3RSASHA1",
        8 => "RSASHA256",
        10 => "RSASHA512",
        12 => "ECCGOST",
        13 => "ECDSAP256SHA256",
        14 => "ECDSAP384SHA384",
        15 => "ED25519",
        16 => "ED448",
        other => return Cow::Owned(other.to_string()),
    };
    Cow::Borrowed(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rdata_layout() {
        let key = Dnskey::new(257, 3, 8, vec![0xaa, 0xbb]);
        assert_eq!(key.rdata(), vec![0x01, 0x01, 3, 8, 0xaa, 0xbb]);
    }

    #[test]
    fn test_key_tag_checksum() {
        // rdata 01 01 03 08 aa bb
        // high bytes: 0x01 + 0x03 + 0xaa, low bytes: 0x01 + 0x08 + 0xbb
        let key = Dnskey::new(257, 3, 8, vec![0xaa, 0xbb]);
        let expected = ((0x01u32 + 0x03 + 0xaa) << 8) + (0x01 + 0x08 + 0xbb);
        assert_eq!(u32::from(key.key_tag()), expected & 0xffff);
    }

    #[test]
    fn test_key_tag_rsamd5() {
        let key = Dnskey::new(256, 3, 1, vec![0x00, 0x12, 0x34, 0x56]);
        assert_eq!(key.key_tag(), 0x1234);
    }

    #[test]
    fn test_flags() {
        let ksk = Dnskey::new(257, 3, 8, vec![1]);
        assert!(ksk.is_zone_key());
        assert!(ksk.is_sep());
        assert!(!ksk.is_revoked());

        let revoked = Dnskey::new(257 | 0x0080, 3, 8, vec![1]);
        assert!(revoked.is_revoked());
    }

    #[test]
    fn test_parse_split_key() {
        let key: Dnskey = "257 3 13 AQID BAU=".parse().unwrap();
        assert_eq!(key.flags, 257);
        assert_eq!(key.algorithm, 13);
        assert_eq!(key.public_key, vec![1, 2, 3, 4, 5]);
        assert_eq!(key.to_string(), "257 3 13 AQIDBAU=");
    }

    #[test]
    fn test_parse_errors() {
        assert!("257 3".parse::<Dnskey>().is_err());
        assert!("257 3 8".parse::<Dnskey>().is_err());
        assert!("x 3 8 AQID".parse::<Dnskey>().is_err());
        assert!("257 3 8 !!!".parse::<Dnskey>().is_err());
    }

    #[test]
    fn test_algorithm_mnemonic() {
        assert_eq!(algorithm_mnemonic(8), "RSASHA256");
        assert_eq!(algorithm_mnemonic(13), "ECDSAP256SHA256");
        assert_eq!(algorithm_mnemonic(200), "200");
    }
}
