// Copyright 2025 Trust Anchors Contributors
// Licensed under GPL-3.0

//! Per-name trust anchor node
//!
//! A node owns the DS records configured for one name together with its
//! RFC 5011 status bits. Nodes are shared as `Arc<KeyNode>`: the key table
//! holds one reference while the node is linked, and every handle returned
//! by a lookup or held by a `DsSetView` holds another.
//!
//! The DS list only ever grows in place. Removing a DS builds a new node
//! from the surviving records and swaps it into the table, so a view that
//! is walking the old node never observes a shrink.

use crate::dnssec::DsRecord;
use crate::error::Result;
use crate::keytable::view::DsSetView;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

struct NodeState {
    ds: Vec<DsRecord>,
    managed: bool,
    initial: bool,
}

/// Trust anchor for one name
pub struct KeyNode {
    state: RwLock<NodeState>,
}

impl KeyNode {
    /// Create a node, optionally seeded with one DS record
    ///
    /// # Panics
    /// If `initial` is set without `managed`.
    pub fn new(ds: Option<DsRecord>, managed: bool, initial: bool) -> Result<Arc<Self>> {
        assert!(
            !initial || managed,
            "an initializing trust anchor must be managed"
        );

        let mut list = Vec::new();
        if let Some(ds) = ds {
            list.try_reserve_exact(1)?;
            list.push(ds);
        }

        Ok(Self::from_parts(list, managed, initial))
    }

    fn from_parts(ds: Vec<DsRecord>, managed: bool, initial: bool) -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new(NodeState {
                ds,
                managed,
                initial,
            }),
        })
    }

    /// Append `ds` unless a structurally equal record is already present
    ///
    /// Returns whether the record was appended. Callers must hold the key
    /// table's write lock.
    pub(crate) fn add_ds(&self, ds: DsRecord) -> Result<bool> {
        let mut state = self.state.write();

        if state.ds.iter().any(|existing| *existing == ds) {
            return Ok(false);
        }

        state.ds.try_reserve(1)?;
        state.ds.push(ds);
        Ok(true)
    }

    /// Replacement node holding every record except `ds`
    ///
    /// Returns `None` when `ds` is not present. The status bits carry over.
    pub(crate) fn without_ds(&self, ds: &DsRecord) -> Result<Option<Arc<Self>>> {
        let state = self.state.read();

        if !state.ds.iter().any(|existing| existing == ds) {
            return Ok(None);
        }

        let mut surviving = Vec::new();
        surviving.try_reserve_exact(state.ds.len() - 1)?;
        surviving.extend(state.ds.iter().filter(|existing| *existing != ds).cloned());

        Ok(Some(Self::from_parts(
            surviving,
            state.managed,
            state.initial,
        )))
    }

    /// View over this node's DS records, or `None` for a null anchor
    pub fn ds_set(self: &Arc<Self>) -> Option<DsSetView> {
        if self.state.read().ds.is_empty() {
            return None;
        }
        Some(DsSetView::new(Arc::clone(self)))
    }

    /// Snapshot of the current DS records
    pub fn ds_records(&self) -> Vec<DsRecord> {
        self.state.read().ds.clone()
    }

    pub fn ds_count(&self) -> usize {
        self.state.read().ds.len()
    }

    pub(crate) fn ds_at(&self, index: usize) -> Option<DsRecord> {
        self.state.read().ds.get(index).cloned()
    }

    /// True when the node carries no key material and only marks its name secure
    pub fn is_null(&self) -> bool {
        self.state.read().ds.is_empty()
    }

    pub fn is_managed(&self) -> bool {
        self.state.read().managed
    }

    pub fn is_initial(&self) -> bool {
        self.state.read().initial
    }

    /// Promote an initializing anchor to fully trusted
    pub fn trust(&self) {
        self.state.write().initial = false;
    }

    /// Status as shown in dumps: `[initializing ]managed` or `static`
    pub(crate) fn status_label(&self) -> &'static str {
        let state = self.state.read();
        match (state.managed, state.initial) {
            (true, true) => "initializing managed",
            (true, false) => "managed",
            (false, _) => "static",
        }
    }
}

impl fmt::Debug for KeyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("KeyNode")
            .field("ds", &state.ds.len())
            .field("managed", &state.managed)
            .field("initial", &state.initial)
            .finish()
    }
}
