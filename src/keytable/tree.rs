// Copyright 2025 Trust Anchors Contributors
// Licensed under GPL-3.0

//! Name-indexed tree with exact and deepest-ancestor lookup

use hickory_proto::rr::Name;
use std::collections::BTreeMap;

/// Result of an exact-match lookup
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The name itself has an entry
    Found(T),
    /// Only an ancestor of the name has an entry
    PartialMatch,
    /// Neither the name nor any ancestor has an entry
    NotFound,
}

/// Map from absolute domain name to one payload
///
/// Keys are ordered canonically (RFC 4034 section 6.1), so iteration visits
/// a parent before all of its descendants.
#[derive(Debug)]
pub struct NameTree<T> {
    entries: BTreeMap<Name, T>,
}

impl<T> Default for NameTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NameTree<T> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Store `value` at `name`, returning the payload it replaced
    pub fn insert(&mut self, name: Name, value: T) -> Option<T> {
        self.entries.insert(name, value)
    }

    pub fn find_exact(&self, name: &Name) -> Lookup<&T> {
        if let Some(value) = self.entries.get(name) {
            return Lookup::Found(value);
        }
        if self.find_deepest(name).is_some() {
            Lookup::PartialMatch
        } else {
            Lookup::NotFound
        }
    }

    /// Longest ancestor-or-self of `name` that has an entry
    pub fn find_deepest(&self, name: &Name) -> Option<(&Name, &T)> {
        let mut candidate = name.clone();
        loop {
            if let Some(found) = self.entries.get_key_value(&candidate) {
                return Some(found);
            }
            if candidate.iter().next().is_none() {
                return None;
            }
            candidate = candidate.base_name();
        }
    }

    pub fn remove(&mut self, name: &Name) -> Option<T> {
        self.entries.remove(name)
    }

    /// Entries in canonical (hierarchy pre-order) order
    pub fn iter(&self) -> impl Iterator<Item = (&Name, &T)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry, returning how many were dropped
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }
}
