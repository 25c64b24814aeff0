// Copyright 2025 Trust Anchors Contributors
// Licensed under GPL-3.0

/// DS digest type: SHA-1 (RFC 3658)
pub const DIGEST_SHA1: u8 = 1;

/// DS digest type: SHA-256 (RFC 4509)
pub const DIGEST_SHA256: u8 = 2;

/// DS digest type: GOST R 34.11-94 (RFC 5933), recognised but not computed
pub const DIGEST_GOST: u8 = 3;

/// DS digest type: SHA-384 (RFC 6605)
pub const DIGEST_SHA384: u8 = 4;

/// Digest used when converting a configured DNSKEY into a DS anchor,
/// and when deriving the DS to remove in `KeyTable::delete_ds`
pub const ANCHOR_DIGEST: u8 = DIGEST_SHA256;

/// DNSKEY protocol field, always 3 (RFC 4034 section 2.1.2)
pub const DNSKEY_PROTOCOL: u8 = 3;

/// DNSKEY flag: zone key
pub const DNSKEY_FLAG_ZONE: u16 = 0x0100;

/// DNSKEY flag: REVOKE (RFC 5011)
pub const DNSKEY_FLAG_REVOKE: u16 = 0x0080;

/// DNSKEY flag: secure entry point
pub const DNSKEY_FLAG_SEP: u16 = 0x0001;

/// Built-in IANA root zone anchors in DS presentation form
/// (KSK-2017 and KSK-2024)
pub const ROOT_ANCHORS: &[&str] = &[
    "20326 8 2 E06D44B80B8F1D39A95C0B0D7C65D08458E880409BBC683457104237C7F8EC8D",
    "38696 8 2 683D2D0ACB8C9B712A1948B27F741219298D0A450D612C483AF444A4C0FB2B16",
];

/// Directory name used under the platform configuration directory
pub const CONFIG_DIR_NAME: &str = "trust-anchors";

/// Default anchor configuration file name
pub const CONFIG_FILE_NAME: &str = "anchors.json";
