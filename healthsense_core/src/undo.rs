//! Bounded undo log.
//!
//! Each [`Operation`] carries the data needed to reverse (and re-apply) one
//! mutation of a hospital's history. The log is a sliding window of the
//! last [`UNDO_DEPTH`] operations; pushing past that silently drops the
//! oldest entry, which then can never be undone.

use crate::{DiseaseHistory, HospitalDirectory, Record, Result, SortKey};
use std::collections::VecDeque;

/// Maximum number of operations kept for undo
pub const UNDO_DEPTH: usize = 3;

/// A reversible mutation of one hospital's disease history
#[derive(Clone, Debug)]
pub enum Operation {
    /// A record appended to `hospital`'s history
    AddRecord { hospital: String, record: Record },
    /// `hospital`'s history replaced by a sort; `previous` is the pre-sort order
    SortReplace {
        hospital: String,
        previous: DiseaseHistory,
        key: SortKey,
    },
}

impl Operation {
    /// Short tag for display and logs
    pub fn label(&self) -> &'static str {
        match self {
            Operation::AddRecord { .. } => "ADD_RECORD",
            Operation::SortReplace {
                key: SortKey::CaseCountDesc,
                ..
            } => "SORT_COUNT",
            Operation::SortReplace {
                key: SortKey::WeekAsc,
                ..
            } => "SORT_WEEK",
        }
    }

    /// Name of the hospital whose history this operation touched
    pub fn hospital(&self) -> &str {
        match self {
            Operation::AddRecord { hospital, .. } => hospital,
            Operation::SortReplace { hospital, .. } => hospital,
        }
    }

    /// Reverse the mutation
    ///
    /// An added record is removed by full-value equality, taking the last
    /// match so earlier identical records stay put. A sort restores the
    /// pre-sort snapshot.
    pub fn undo(&self, directory: &mut HospitalDirectory) -> Result<()> {
        match self {
            Operation::AddRecord { hospital, record } => {
                directory
                    .history_mut(hospital)?
                    .delete_last_matching(|r| r == record);
            }
            Operation::SortReplace {
                hospital, previous, ..
            } => {
                *directory.history_mut(hospital)? = previous.clone();
            }
        }
        Ok(())
    }

    /// Re-apply the mutation
    ///
    /// Not used by [`UndoLog`]; available to callers holding an operation
    /// returned from [`UndoLog::undo`].
    pub fn redo(&self, directory: &mut HospitalDirectory) -> Result<()> {
        match self {
            Operation::AddRecord { hospital, record } => {
                directory.history_mut(hospital)?.append(record.clone());
            }
            Operation::SortReplace { hospital, key, .. } => {
                directory.history_mut(hospital)?.sort_by(*key);
            }
        }
        Ok(())
    }
}

/// Sliding window of the most recent operations, undone newest first
#[derive(Clone, Debug, Default)]
pub struct UndoLog {
    entries: VecDeque<Operation>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an operation, evicting the oldest when full
    pub fn push(&mut self, operation: Operation) {
        if self.entries.len() == UNDO_DEPTH {
            if let Some(evicted) = self.entries.pop_front() {
                tracing::debug!(
                    "Undo log full, dropping {} on {}",
                    evicted.label(),
                    evicted.hospital()
                );
            }
        }
        self.entries.push_back(operation);
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Reverse the most recent operation and drop it from the log
    ///
    /// Returns the undone operation, or `None` when the log is empty.
    pub fn undo(&mut self, directory: &mut HospitalDirectory) -> Result<Option<Operation>> {
        let Some(operation) = self.entries.back() else {
            return Ok(None);
        };

        operation.undo(directory)?;
        tracing::debug!("Undid {} on {}", operation.label(), operation.hospital());
        Ok(self.entries.pop_back())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(disease: &str, week: u32, count: u32) -> Record {
        Record::new(disease, week, count).unwrap()
    }

    fn directory_with(records: &[Record]) -> HospitalDirectory {
        let mut directory = HospitalDirectory::new();
        directory.add("NHSL", "Western").unwrap();
        for record in records {
            directory.history_mut("NHSL").unwrap().append(record.clone());
        }
        directory
    }

    fn add_op(record: Record) -> Operation {
        Operation::AddRecord {
            hospital: "NHSL".into(),
            record,
        }
    }

    fn history(directory: &HospitalDirectory) -> Vec<Record> {
        directory.get("NHSL").unwrap().history().as_slice().to_vec()
    }

    #[test]
    fn test_empty_log() {
        let mut log = UndoLog::new();
        let mut directory = directory_with(&[]);

        assert!(!log.can_undo());
        assert!(log.undo(&mut directory).unwrap().is_none());
    }

    #[test]
    fn test_undo_add_removes_exact_last_value() {
        let mut directory = directory_with(&[
            rec("Flu", 1, 10),
            rec("Flu", 2, 10),
            rec("Flu", 1, 10),
        ]);
        let mut log = UndoLog::new();
        log.push(add_op(rec("Flu", 1, 10)));

        let undone = log.undo(&mut directory).unwrap().unwrap();

        assert_eq!(undone.label(), "ADD_RECORD");
        assert_eq!(history(&directory), vec![rec("Flu", 1, 10), rec("Flu", 2, 10)]);
        assert!(!log.can_undo());
    }

    #[test]
    fn test_undo_sort_restores_snapshot() {
        let mut directory = directory_with(&[rec("A", 3, 5), rec("B", 1, 9), rec("C", 2, 7)]);
        let before = history(&directory);

        let hist = directory.history_mut("NHSL").unwrap();
        let previous = hist.clone();
        hist.sort_by_week();

        let mut log = UndoLog::new();
        log.push(Operation::SortReplace {
            hospital: "NHSL".into(),
            previous,
            key: SortKey::WeekAsc,
        });

        log.undo(&mut directory).unwrap();
        assert_eq!(history(&directory), before);
    }

    #[test]
    fn test_window_keeps_last_three() {
        let mut directory = directory_with(&[]);
        let mut log = UndoLog::new();

        for week in 1..=4 {
            let record = rec("Dengue", week, 10 * week);
            directory.history_mut("NHSL").unwrap().append(record.clone());
            log.push(add_op(record));
        }
        assert_eq!(log.len(), UNDO_DEPTH);

        // 4th push undone first
        log.undo(&mut directory).unwrap();
        assert_eq!(history(&directory).len(), 3);
        assert!(!history(&directory).contains(&rec("Dengue", 4, 40)));

        log.undo(&mut directory).unwrap();
        log.undo(&mut directory).unwrap();
        assert!(!log.can_undo());

        // 1st push fell out of the window
        assert_eq!(history(&directory), vec![rec("Dengue", 1, 10)]);
        assert!(log.undo(&mut directory).unwrap().is_none());
    }

    #[test]
    fn test_redo_reapplies() {
        let mut directory = directory_with(&[rec("Flu", 1, 10)]);
        let mut log = UndoLog::new();
        log.push(add_op(rec("Flu", 1, 10)));

        let undone = log.undo(&mut directory).unwrap().unwrap();
        assert!(history(&directory).is_empty());

        undone.redo(&mut directory).unwrap();
        assert_eq!(history(&directory), vec![rec("Flu", 1, 10)]);
    }

    #[test]
    fn test_redo_sort_reapplies_key() {
        let mut directory = directory_with(&[rec("A", 1, 5), rec("B", 2, 9)]);
        let op = Operation::SortReplace {
            hospital: "NHSL".into(),
            previous: directory.get("NHSL").unwrap().history().clone(),
            key: SortKey::CaseCountDesc,
        };

        op.redo(&mut directory).unwrap();

        assert_eq!(op.label(), "SORT_COUNT");
        assert_eq!(history(&directory), vec![rec("B", 2, 9), rec("A", 1, 5)]);
    }
}
