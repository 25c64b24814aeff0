// Copyright 2025 Trust Anchors Contributors
// Licensed under GPL-3.0

//! CLI command implementations

pub mod anchors;
pub mod keys;
