// Copyright 2025 Trust Anchors Contributors
// Licensed under GPL-3.0

//! Error types for key table operations

use thiserror::Error;

/// Result type alias for key table operations
pub type Result<T> = std::result::Result<T, KeytableError>;

/// Errors returned by the key table and the DNSSEC record codec
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeytableError {
    /// No trust anchor exists for the name, nor for any of its ancestors
    #[error("trust anchor not found")]
    NotFound,

    /// The name only resolved to an ancestor, or the node lacks the requested DS
    #[error("partial match: name resolved to an ancestor or the DS is absent")]
    PartialMatch,

    /// Allocation failed while building a node or composing output
    #[error("out of memory")]
    OutOfMemory,

    /// A record set cursor moved past its last record
    #[error("no more records")]
    NoMore,

    /// The domain name could not be parsed
    #[error("invalid domain name: {0}")]
    InvalidName(String),

    /// A DS or DNSKEY record could not be parsed from presentation form
    #[error("parse error: {0}")]
    Parse(String),

    /// The DS digest type is not one we can compute
    #[error("unsupported DS digest type {0}")]
    UnsupportedDigest(u8),
}

impl KeytableError {
    /// True for both `NotFound` and `PartialMatch`
    ///
    /// Most callers only care whether an exact anchor exists, and treat an
    /// ancestor-only match the same as a miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound | Self::PartialMatch)
    }
}

impl From<std::collections::TryReserveError> for KeytableError {
    fn from(_: std::collections::TryReserveError) -> Self {
        Self::OutOfMemory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_match_collapses_to_not_found() {
        assert!(KeytableError::NotFound.is_not_found());
        assert!(KeytableError::PartialMatch.is_not_found());
        assert!(!KeytableError::OutOfMemory.is_not_found());
        assert!(!KeytableError::NoMore.is_not_found());
    }

    #[test]
    fn test_try_reserve_maps_to_out_of_memory() {
        let mut v: Vec<u8> = Vec::new();
        let err = v.try_reserve(usize::MAX).unwrap_err();
        assert_eq!(KeytableError::from(err), KeytableError::OutOfMemory);
    }
}
