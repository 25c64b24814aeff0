// Copyright 2025 Trust Anchors Contributors
// Licensed under GPL-3.0

//! Cursor-based record set interface and the DS view over a trust anchor

use crate::dnssec::DsRecord;
use crate::error::{KeytableError, Result};
use crate::keytable::node::KeyNode;
use std::sync::Arc;

/// An enumerable set of records with an explicit cursor
///
/// Validator code walks anchors through this interface the same way it
/// walks any other record set.
pub trait RecordSet {
    type Record;

    /// Move to the first record; `NoMore` if the set is empty
    fn first(&mut self) -> Result<()>;

    /// Move to the following record; `NoMore` past the end
    fn next(&mut self) -> Result<()>;

    /// Owned copy of the record under the cursor
    fn current(&self) -> Option<Self::Record>;

    /// New set over the same records with its cursor reset
    fn clone_set(&self) -> Self
    where
        Self: Sized;

    /// Release the underlying records; later cursor moves return `NoMore`
    fn disassociate(&mut self);

    fn is_associated(&self) -> bool;

    fn count(&self) -> usize;
}

/// Walk a record set from its first record to the end
pub fn collect_records<R: RecordSet>(set: &mut R) -> Vec<R::Record> {
    let mut records = Vec::new();
    let mut position = set.first();
    while position.is_ok() {
        if let Some(record) = set.current() {
            records.push(record);
        }
        position = set.next();
    }
    records
}

/// DS records of one `KeyNode`
///
/// The view keeps its node alive until it is disassociated or dropped.
/// Cursor positions are indexes into the node's append-only list, so a
/// concurrent `add_ds` on the same node can only extend what the view has
/// yet to visit.
#[derive(Debug)]
pub struct DsSetView {
    node: Option<Arc<KeyNode>>,
    cursor: Option<usize>,
}

impl DsSetView {
    pub(crate) fn new(node: Arc<KeyNode>) -> Self {
        Self {
            node: Some(node),
            cursor: None,
        }
    }
}

impl RecordSet for DsSetView {
    type Record = DsRecord;

    fn first(&mut self) -> Result<()> {
        self.cursor = None;
        let node = self.node.as_ref().ok_or(KeytableError::NoMore)?;
        if node.ds_count() == 0 {
            return Err(KeytableError::NoMore);
        }
        self.cursor = Some(0);
        Ok(())
    }

    fn next(&mut self) -> Result<()> {
        let node = self.node.as_ref().ok_or(KeytableError::NoMore)?;
        let index = self.cursor.ok_or(KeytableError::NoMore)? + 1;
        if index < node.ds_count() {
            self.cursor = Some(index);
            Ok(())
        } else {
            self.cursor = None;
            Err(KeytableError::NoMore)
        }
    }

    fn current(&self) -> Option<DsRecord> {
        let node = self.node.as_ref()?;
        node.ds_at(self.cursor?)
    }

    fn clone_set(&self) -> Self {
        Self {
            node: self.node.clone(),
            cursor: None,
        }
    }

    fn disassociate(&mut self) {
        self.node = None;
        self.cursor = None;
    }

    fn is_associated(&self) -> bool {
        self.node.is_some()
    }

    fn count(&self) -> usize {
        self.node.as_ref().map_or(0, |node| node.ds_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::thread;

    fn ds(tag: u16) -> DsRecord {
        DsRecord::new(tag, 8, 2, vec![(tag % 251) as u8; 32])
    }

    fn node_with(tags: &[u16]) -> Arc<KeyNode> {
        let node = KeyNode::new(None, false, false).unwrap();
        for tag in tags {
            node.add_ds(ds(*tag)).unwrap();
        }
        node
    }

    #[test]
    fn test_iterate_in_insertion_order() {
        let node = node_with(&[3, 1, 2]);
        let mut view = node.ds_set().unwrap();

        assert!(view.current().is_none());
        let tags: Vec<u16> = collect_records(&mut view).iter().map(|d| d.key_tag).collect();
        assert_eq!(tags, vec![3, 1, 2]);
        assert_eq!(view.count(), 3);
    }

    #[test]
    fn test_next_past_end() {
        let node = node_with(&[1]);
        let mut view = node.ds_set().unwrap();

        view.first().unwrap();
        assert_eq!(view.next(), Err(KeytableError::NoMore));
        assert!(view.current().is_none());
        assert_eq!(view.next(), Err(KeytableError::NoMore));
    }

    #[test]
    fn test_next_without_first() {
        let node = node_with(&[1, 2]);
        let mut view = node.ds_set().unwrap();
        assert_eq!(view.next(), Err(KeytableError::NoMore));
    }

    #[test]
    fn test_current_outlives_view() {
        let node = node_with(&[7]);
        let mut view = node.ds_set().unwrap();
        view.first().unwrap();
        let record = view.current().unwrap();
        drop(view);
        drop(node);
        assert_eq!(record.key_tag, 7);
    }

    #[test]
    fn test_clone_resets_cursor_and_holds_reference() {
        let node = node_with(&[1, 2]);
        let mut view = node.ds_set().unwrap();
        assert_eq!(Arc::strong_count(&node), 2);

        view.first().unwrap();
        view.next().unwrap();

        let copy = view.clone_set();
        assert_eq!(Arc::strong_count(&node), 3);
        assert!(copy.current().is_none());
        assert_eq!(view.current().unwrap().key_tag, 2);
    }

    #[test]
    fn test_disassociate_releases_node() {
        let node = node_with(&[1]);
        let mut view = node.ds_set().unwrap();
        assert_eq!(Arc::strong_count(&node), 2);

        view.disassociate();
        assert!(!view.is_associated());
        assert_eq!(Arc::strong_count(&node), 1);
        assert_eq!(view.first(), Err(KeytableError::NoMore));
        assert_eq!(view.count(), 0);
    }

    #[test]
    fn test_view_sees_appended_tail() {
        let node = node_with(&[1, 2]);
        let mut view = node.ds_set().unwrap();

        view.first().unwrap();
        view.next().unwrap();
        node.add_ds(ds(3)).unwrap();

        view.next().unwrap();
        assert_eq!(view.current().unwrap().key_tag, 3);
        assert_eq!(view.next(), Err(KeytableError::NoMore));
    }

    #[test]
    fn test_concurrent_growth_during_iteration() {
        let initial: Vec<u16> = (1..=10).collect();
        let node = node_with(&initial);
        let barrier = Arc::new(Barrier::new(2));

        let writer = {
            let node = Arc::clone(&node);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for tag in 11..=500 {
                    node.add_ds(ds(tag)).unwrap();
                }
            })
        };

        let mut view = node.ds_set().unwrap();
        let mut seen = Vec::new();
        view.first().unwrap();
        seen.push(view.current().unwrap());
        barrier.wait();
        while view.next().is_ok() {
            seen.push(view.current().unwrap());
        }
        writer.join().unwrap();

        assert!(seen.len() >= initial.len());
        for (i, record) in seen.iter().enumerate() {
            assert_eq!(*record, ds(i as u16 + 1));
        }
    }
}
