// Copyright 2025 Trust Anchors Contributors
// Licensed under GPL-3.0

//! Trust Anchors - DNSSEC trust anchor key table
//!
//! A concurrent registry of DS trust anchors keyed by domain name, used by a
//! validating resolver to decide whether a name lies beneath a secure zone
//! and which DS records anchor that zone.

pub mod config;
pub mod constants;
pub mod dnssec;
pub mod error;
pub mod keytable;

pub use constants::*;

// Re-export commonly used types
pub use config::{load_keytable, AnchorConfig};
pub use dnssec::{Dnskey, DsRecord};
pub use error::{KeytableError, Result};
pub use keytable::{collect_records, DsSetView, KeyNode, KeyTable, RecordSet, SecureDomain};
