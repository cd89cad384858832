//! Severity ranking tree.
//!
//! A binary search tree keyed by peak case count. Equal counts go to the
//! right subtree, so an in-order walk lists duplicates in insertion order.
//! The tree is never updated incrementally: [`SeverityClassifier::rebuild`]
//! throws it away and reinserts one entry per hospital.

use crate::{HospitalDirectory, SeverityEntry, Traversal};
use std::fmt;

struct Node {
    entry: SeverityEntry,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn leaf(entry: SeverityEntry) -> Self {
        Self {
            entry,
            left: None,
            right: None,
        }
    }
}

/// BST of hospital peaks ordered by case count
///
/// Insertion, traversal and teardown all run on explicit stacks, so a
/// degenerate chain (every hospital at the same peak) costs heap, not call
/// depth.
#[derive(Default)]
pub struct SeverityClassifier {
    root: Option<Box<Node>>,
    len: usize,
}

impl SeverityClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the current tree
    pub fn reset(&mut self) {
        let mut pending: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
        self.len = 0;
    }

    /// Insert by case count; equal keys descend right
    pub fn insert(&mut self, entry: SeverityEntry) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = if entry.case_count < node.entry.case_count {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Box::new(Node::leaf(entry)));
        self.len += 1;
    }

    /// Rebuild from each hospital's peak record
    ///
    /// Hospitals without records contribute nothing. The tree reflects the
    /// histories as they are now and goes stale on the next mutation.
    pub fn rebuild(&mut self, directory: &HospitalDirectory) {
        self.reset();
        for hospital in directory.all() {
            if let Some(peak) = hospital.history().max_by_case_count() {
                self.insert(SeverityEntry::from_peak(hospital.name(), peak));
            }
        }
        tracing::debug!(
            "Rebuilt severity tree with {} of {} hospitals",
            self.len,
            directory.len()
        );
    }

    /// Entries in the requested depth-first order
    pub fn traverse(&self, order: Traversal) -> Vec<&SeverityEntry> {
        let mut out = Vec::with_capacity(self.len);
        match order {
            Traversal::PreOrder => {
                let mut stack: Vec<&Node> = self.root.as_deref().into_iter().collect();
                while let Some(node) = stack.pop() {
                    out.push(&node.entry);
                    stack.extend(node.right.as_deref());
                    stack.extend(node.left.as_deref());
                }
            }
            Traversal::InOrder => {
                let mut stack: Vec<&Node> = Vec::new();
                let mut current = self.root.as_deref();
                loop {
                    while let Some(node) = current {
                        stack.push(node);
                        current = node.left.as_deref();
                    }
                    let Some(node) = stack.pop() else {
                        break;
                    };
                    out.push(&node.entry);
                    current = node.right.as_deref();
                }
            }
            Traversal::PostOrder => {
                // node, right, left reversed
                let mut stack: Vec<&Node> = self.root.as_deref().into_iter().collect();
                while let Some(node) = stack.pop() {
                    out.push(&node.entry);
                    stack.extend(node.left.as_deref());
                    stack.extend(node.right.as_deref());
                }
                out.reverse();
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

impl Drop for SeverityClassifier {
    fn drop(&mut self) {
        self.reset();
    }
}

impl fmt::Debug for SeverityClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeverityClassifier")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;
    use proptest::prelude::*;

    fn entry(hospital: &str, count: u32) -> SeverityEntry {
        SeverityEntry {
            hospital: hospital.into(),
            disease: "Dengue".into(),
            case_count: count,
        }
    }

    fn hospitals(entries: &[&SeverityEntry]) -> Vec<String> {
        entries.iter().map(|e| e.hospital.clone()).collect()
    }

    #[test]
    fn test_traversal_orders() {
        let mut tree = SeverityClassifier::new();
        for (name, count) in [("root", 50), ("low", 20), ("high", 80), ("mid", 30)] {
            tree.insert(entry(name, count));
        }

        assert_eq!(
            hospitals(&tree.traverse(Traversal::InOrder)),
            vec!["low", "mid", "root", "high"]
        );
        assert_eq!(
            hospitals(&tree.traverse(Traversal::PreOrder)),
            vec!["root", "low", "mid", "high"]
        );
        assert_eq!(
            hospitals(&tree.traverse(Traversal::PostOrder)),
            vec!["mid", "low", "high", "root"]
        );
    }

    #[test]
    fn test_duplicates_go_right() {
        let mut tree = SeverityClassifier::new();
        tree.insert(entry("first", 40));
        tree.insert(entry("second", 40));
        tree.insert(entry("third", 40));

        // a right-leaning chain: pre-order and in-order agree
        assert_eq!(
            hospitals(&tree.traverse(Traversal::PreOrder)),
            vec!["first", "second", "third"]
        );
        assert_eq!(
            hospitals(&tree.traverse(Traversal::InOrder)),
            vec!["first", "second", "third"]
        );
    }

    proptest! {
        #[test]
        fn in_order_is_sorted_and_stable(counts in prop::collection::vec(1u32..=60, 0..80)) {
            let mut tree = SeverityClassifier::new();
            for (i, &count) in counts.iter().enumerate() {
                tree.insert(entry(&i.to_string(), count));
            }

            // equal counts keep insertion order, so a stable sort is the oracle
            let mut expected: Vec<(u32, String)> = counts
                .iter()
                .enumerate()
                .map(|(i, &count)| (count, i.to_string()))
                .collect();
            expected.sort_by_key(|(count, _)| *count);

            let walked: Vec<(u32, String)> = tree
                .traverse(Traversal::InOrder)
                .iter()
                .map(|e| (e.case_count, e.hospital.clone()))
                .collect();
            prop_assert_eq!(walked, expected);
        }

        #[test]
        fn every_order_visits_each_entry_once(counts in prop::collection::vec(1u32..=60, 0..80)) {
            let mut tree = SeverityClassifier::new();
            for (i, &count) in counts.iter().enumerate() {
                tree.insert(entry(&i.to_string(), count));
            }

            for order in [Traversal::PreOrder, Traversal::PostOrder] {
                let mut seen: Vec<usize> = tree
                    .traverse(order)
                    .iter()
                    .map(|e| e.hospital.parse().unwrap())
                    .collect();
                seen.sort_unstable();
                prop_assert_eq!(seen, (0..counts.len()).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_degenerate_chain_does_not_exhaust_stack() {
        const DEPTH: usize = 20_000;
        let mut tree = SeverityClassifier::new();
        for i in 0..DEPTH {
            tree.insert(entry(&i.to_string(), 40));
        }
        assert_eq!(tree.len(), DEPTH);

        for order in [Traversal::InOrder, Traversal::PreOrder, Traversal::PostOrder] {
            assert_eq!(tree.traverse(order).len(), DEPTH);
        }
        let in_order = tree.traverse(Traversal::InOrder);
        assert_eq!(in_order[0].hospital, "0");
        assert_eq!(in_order[DEPTH - 1].hospital, "19999");
        let post_order = tree.traverse(Traversal::PostOrder);
        assert_eq!(post_order[0].hospital, "19999");

        // dropping a populated chain must not recurse either
        drop(in_order);
        drop(post_order);
        drop(tree);
    }

    #[test]
    fn test_reset_discards_tree() {
        let mut tree = SeverityClassifier::new();
        tree.insert(entry("a", 1));
        tree.reset();

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.traverse(Traversal::InOrder).is_empty());
    }

    #[test]
    fn test_rebuild_uses_peaks_and_skips_empty_histories() {
        let mut directory = HospitalDirectory::new();
        directory.add("NHSL", "Western").unwrap();
        directory.add("KTH", "Central").unwrap();
        directory.add("Empty", "Northern").unwrap();

        let nhsl = directory.history_mut("NHSL").unwrap();
        nhsl.append(Record::new("Dengue", 10, 120).unwrap());
        nhsl.append(Record::new("Dengue", 12, 250).unwrap());
        let kth = directory.history_mut("KTH").unwrap();
        kth.append(Record::new("Leptospirosis", 10, 45).unwrap());

        let mut tree = SeverityClassifier::new();
        tree.insert(entry("stale", 1));
        tree.rebuild(&directory);

        let ranked = tree.traverse(Traversal::InOrder);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].hospital, "KTH");
        assert_eq!(ranked[0].case_count, 45);
        assert_eq!(ranked[1].hospital, "NHSL");
        assert_eq!(ranked[1].case_count, 250);
    }
}
