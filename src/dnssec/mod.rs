// Copyright 2025 Trust Anchors Contributors
// Licensed under GPL-3.0

//! DNSSEC record types used by the key table

pub mod dnskey;
pub mod ds;
pub mod name;

pub use dnskey::{algorithm_mnemonic, Dnskey};
pub use ds::DsRecord;
pub use name::{canonical_wire, parse_name, to_absolute};
