// Copyright 2025 Trust Anchors Contributors
// Licensed under GPL-3.0

//! DNSSEC trust anchor key table
//!
//! The table maps domain names to `KeyNode`s and answers the validator's
//! two questions: is a name beneath a secure zone, and which DS records
//! anchor that zone.
//!
//! Locking: the table's `RwLock` guards the shape of the name tree and each
//! node has its own `RwLock` for its DS list and status bits. A node lock is
//! only ever taken while the table lock is already held, or with no table
//! lock at all. Never request the table lock while holding a node lock.

pub mod node;
pub mod tree;
pub mod view;

pub use node::KeyNode;
pub use tree::{Lookup, NameTree};
pub use view::{collect_records, DsSetView, RecordSet};

use crate::constants::ANCHOR_DIGEST;
use crate::dnssec::{algorithm_mnemonic, to_absolute, Dnskey, DsRecord};
use crate::error::{KeytableError, Result};
use hickory_proto::rr::Name;
use parking_lot::RwLock;
use std::io;
use std::sync::Arc;

/// Answer to "does this name require DNSSEC validation?"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecureDomain {
    /// True when the name is at or beneath a trust anchor
    pub want_dnssec: bool,
    /// The closest enclosing anchor name, when there is one
    pub matched: Option<Name>,
}

/// Registry of trust anchors, shared as `Arc<KeyTable>`
#[derive(Debug)]
pub struct KeyTable {
    tree: RwLock<NameTree<Arc<KeyNode>>>,
}

impl KeyTable {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            tree: RwLock::new(NameTree::new()),
        })
    }

    /// Add a trust anchor for `name`
    ///
    /// A new name gets a node seeded with `ds` (or an empty node when `ds`
    /// is `None`). For an existing name, `ds` is merged into the existing
    /// node and its status bits are left alone. Adding a DS that is already
    /// present is a no-op.
    ///
    /// # Panics
    /// If `initial` is set without `managed`.
    pub fn add(&self, name: &Name, managed: bool, initial: bool, ds: Option<DsRecord>) -> Result<()> {
        assert!(
            !initial || managed,
            "an initializing trust anchor must be managed"
        );
        let name = to_absolute(name);

        let mut tree = self.tree.write();

        if let Lookup::Found(node) = tree.find_exact(&name) {
            if let Some(ds) = ds {
                let tag = ds.key_tag;
                if node.add_ds(ds)? {
                    tracing::debug!("Added DS {} to existing trust anchor {}", tag, name);
                }
            }
            return Ok(());
        }

        let node = KeyNode::new(ds, managed, initial)?;
        tracing::debug!(
            "Created trust anchor {} ({}, {} DS)",
            name,
            node.status_label(),
            node.ds_count()
        );
        tree.insert(name.into_owned(), node);

        Ok(())
    }

    /// Mark `name` as secure without supplying key material
    pub fn mark_secure(&self, name: &Name) -> Result<()> {
        self.add(name, true, false, None)
    }

    /// Remove the trust anchor at exactly `name`
    pub fn delete(&self, name: &Name) -> Result<()> {
        let name = to_absolute(name);

        let removed = self.tree.write().remove(&name);
        match removed {
            Some(node) => {
                tracing::debug!("Deleted trust anchor {} ({} DS)", name, node.ds_count());
                Ok(())
            }
            None => Err(KeytableError::NotFound),
        }
    }

    /// Remove the DS matching `key` from the anchor at exactly `name`
    ///
    /// The DS is derived with SHA-256. The node is replaced by a copy
    /// without that record, so views already open on the old node are
    /// unaffected. Removing the last DS leaves a null anchor in place.
    ///
    /// Returns `NotFound` when nothing covers `name`, and `PartialMatch`
    /// when only an ancestor does or the node has no such DS.
    pub fn delete_ds(&self, name: &Name, key: &Dnskey) -> Result<()> {
        let name = to_absolute(name);
        let ds = DsRecord::from_dnskey(&name, key, ANCHOR_DIGEST)?;

        let mut tree = self.tree.write();

        let replacement = match tree.find_exact(&name) {
            Lookup::Found(node) => node.without_ds(&ds)?,
            Lookup::PartialMatch => return Err(KeytableError::PartialMatch),
            Lookup::NotFound => return Err(KeytableError::NotFound),
        };
        let replacement = replacement.ok_or(KeytableError::PartialMatch)?;

        tracing::debug!(
            "Removed DS {} from trust anchor {}, {} DS remain",
            ds.key_tag,
            name,
            replacement.ds_count()
        );
        let old = tree.insert(name.into_owned(), replacement);
        drop(tree);
        drop(old);

        Ok(())
    }

    /// Trust anchor at exactly `name`
    ///
    /// A name covered only by an ancestor's anchor is `NotFound` here.
    pub fn find(&self, name: &Name) -> Result<Arc<KeyNode>> {
        let name = to_absolute(name);
        let tree = self.tree.read();

        let result = match tree.find_exact(&name) {
            Lookup::Found(node) => Ok(Arc::clone(node)),
            Lookup::PartialMatch | Lookup::NotFound => Err(KeytableError::NotFound),
        };
        tracing::trace!("Find {}: {:?}", name, result.as_ref().map(|_| ()));
        result
    }

    /// Closest enclosing name (including `name` itself) that has an anchor,
    /// whether or not that anchor carries DS records
    pub fn find_deepest_match(&self, name: &Name) -> Result<Name> {
        let name = to_absolute(name);
        let tree = self.tree.read();

        tree.find_deepest(&name)
            .map(|(found, _)| found.clone())
            .ok_or(KeytableError::NotFound)
    }

    /// Whether `name` is at or beneath any trust anchor
    pub fn is_secure_domain(&self, name: &Name) -> SecureDomain {
        let matched = self.find_deepest_match(name).ok();
        tracing::trace!("Secure domain check {}: {:?}", name, matched);

        SecureDomain {
            want_dnssec: matched.is_some(),
            matched,
        }
    }

    /// Append one line per DS record to `out`, in canonical name order:
    /// `<name>/<algorithm>/<key tag> ; [initializing ]managed|static`
    ///
    /// Null anchors produce no lines. On allocation failure the text
    /// composed so far stays in `out` and `OutOfMemory` is returned.
    pub fn totext(&self, out: &mut String) -> Result<()> {
        let tree = self.tree.read();

        for (name, node) in tree.iter() {
            let status = node.status_label();
            for ds in node.ds_records() {
                let mut len = LineLen(0);
                write_anchor_line(&mut len, name, &ds, status)?;
                out.try_reserve(len.0)?;
                write_anchor_line(out, name, &ds, status)?;
            }
        }

        Ok(())
    }

    /// `totext` output as a new string, with the outcome of the walk
    ///
    /// The text is returned even on `OutOfMemory` and then holds every
    /// line composed before the failure.
    pub fn dump_text(&self) -> (String, Result<()>) {
        let mut text = String::new();
        let result = self.totext(&mut text);
        (text, result)
    }

    /// Write the table to `writer` with a comment header
    pub fn dump<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        let (text, result) = self.dump_text();
        if let Err(e) = result {
            tracing::warn!("Trust anchor dump truncated: {}", e);
        }

        writeln!(writer, ";")?;
        writeln!(writer, "; secure roots")?;
        writeln!(writer, ";")?;
        writer.write_all(text.as_bytes())?;
        writer.flush()
    }

    /// Call `f` for every anchor in canonical name order
    ///
    /// The table's read lock is held for the whole walk; `f` must not call
    /// `add`, `delete` or `delete_ds` on this table.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&Name, &Arc<KeyNode>),
    {
        let tree = self.tree.read();
        for (name, node) in tree.iter() {
            f(name, node);
        }
    }

    /// Names that have anchors, in canonical order
    pub fn names(&self) -> Vec<Name> {
        self.tree.read().iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tree.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.read().is_empty()
    }
}

/// Byte count of formatted output, without storing it
struct LineLen(usize);

impl std::fmt::Write for LineLen {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

fn write_anchor_line<W: std::fmt::Write>(
    w: &mut W,
    name: &Name,
    ds: &DsRecord,
    status: &str,
) -> Result<()> {
    // Writing into reserved capacity only fails if a Display impl does
    writeln!(w, "{}/{}/{} ; {}", name, algorithm_mnemonic(ds.algorithm), ds.key_tag, status)
        .map_err(|_| KeytableError::OutOfMemory)
}

impl Drop for KeyTable {
    fn drop(&mut self) {
        let released = self.tree.get_mut().clear();
        tracing::debug!("Key table destroyed, released {} trust anchor(s)", released);
    }
}
