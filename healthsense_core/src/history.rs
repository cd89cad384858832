//! Per-hospital disease history.
//!
//! Records are kept in arrival order. The order only changes when a sort
//! swaps in a whole new sequence (see [`crate::sort`]).

use crate::{Record, SortKey};

/// Ordered sequence of weekly records owned by one hospital
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiseaseHistory {
    records: Vec<Record>,
}

impl DiseaseHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record at the tail
    pub fn append(&mut self, record: Record) {
        self.records.push(record);
    }

    /// First record for a disease (case-insensitive)
    pub fn search_first(&self, disease: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.is_disease(disease))
    }

    /// Remove the *last* record satisfying `pred`
    ///
    /// Undo relies on this picking the most recent match when equal records
    /// exist earlier in the history. Returns the removed record, or `None`
    /// when nothing matched.
    pub fn delete_last_matching<F>(&mut self, pred: F) -> Option<Record>
    where
        F: Fn(&Record) -> bool,
    {
        let idx = self.records.iter().rposition(|r| pred(r))?;
        Some(self.records.remove(idx))
    }

    /// Peak record; the earliest one wins on ties
    pub fn max_by_case_count(&self) -> Option<&Record> {
        let mut records = self.records.iter();
        let first = records.next()?;
        Some(records.fold(first, |max, r| {
            if r.case_count() > max.case_count() {
                r
            } else {
                max
            }
        }))
    }

    /// Swap in a new sequence wholesale
    pub fn replace(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    /// Stable sort, highest case count first
    pub fn sort_by_count(&mut self) {
        self.sort_by(SortKey::CaseCountDesc);
    }

    /// Stable sort, earliest week first
    pub fn sort_by_week(&mut self) {
        self.sort_by(SortKey::WeekAsc);
    }

    pub fn sort_by(&mut self, key: SortKey) {
        let sorted = crate::sort::merge_sort(std::mem::take(&mut self.records), key);
        self.replace(sorted);
        tracing::debug!("Sorted {} records by {:?}", self.records.len(), key);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a DiseaseHistory {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Record> for DiseaseHistory {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(disease: &str, week: u32, count: u32) -> Record {
        Record::new(disease, week, count).unwrap()
    }

    #[test]
    fn test_append_preserves_arrival_order() {
        let mut history = DiseaseHistory::new();
        history.append(rec("Dengue", 12, 250));
        history.append(rec("Dengue", 10, 120));
        history.append(rec("COVID-19", 11, 90));

        let weeks: Vec<u32> = history.iter().map(|r| r.week_number()).collect();
        assert_eq!(weeks, vec![12, 10, 11]);
    }

    #[test]
    fn test_search_first_is_case_insensitive() {
        let mut history = DiseaseHistory::new();
        history.append(rec("Dengue", 10, 120));
        history.append(rec("dengue", 11, 180));

        let found = history.search_first("DENGUE").unwrap();
        assert_eq!(found.week_number(), 10);
        assert!(history.search_first("Cholera").is_none());
    }

    #[test]
    fn test_delete_last_matching_removes_last() {
        let mut history = DiseaseHistory::new();
        history.append(rec("Flu", 1, 10));
        history.append(rec("Flu", 2, 10));

        let removed = history.delete_last_matching(|r| r.is_disease("flu"));

        assert_eq!(removed, Some(rec("Flu", 2, 10)));
        assert_eq!(history.as_slice(), &[rec("Flu", 1, 10)]);
    }

    #[test]
    fn test_delete_last_matching_head_and_no_match() {
        let mut history = DiseaseHistory::new();
        history.append(rec("Flu", 1, 10));
        history.append(rec("Cholera", 2, 5));

        assert!(history.delete_last_matching(|r| r.case_count() > 100).is_none());
        assert_eq!(history.len(), 2);

        history.delete_last_matching(|r| r.is_disease("flu"));
        assert_eq!(history.as_slice(), &[rec("Cholera", 2, 5)]);

        let mut empty = DiseaseHistory::new();
        assert!(empty.delete_last_matching(|_| true).is_none());
    }

    #[test]
    fn test_max_by_case_count() {
        let mut history = DiseaseHistory::new();
        assert!(history.max_by_case_count().is_none());

        history.append(rec("Leptospirosis", 10, 45));
        history.append(rec("Leptospirosis", 11, 60));
        history.append(rec("Influenza", 12, 75));
        assert_eq!(history.max_by_case_count(), Some(&rec("Influenza", 12, 75)));
    }

    #[test]
    fn test_max_by_case_count_prefers_earliest_tie() {
        let history: DiseaseHistory = vec![
            rec("Cholera", 1, 40),
            rec("Dengue", 2, 95),
            rec("Typhoid", 3, 95),
        ]
        .into_iter()
        .collect();

        assert_eq!(history.max_by_case_count().unwrap().disease_name(), "Dengue");
    }

    #[test]
    fn test_clone_is_independent() {
        let mut history = DiseaseHistory::new();
        history.append(rec("Dengue", 3, 30));
        history.append(rec("Dengue", 1, 10));

        let snapshot = history.clone();
        history.sort_by_week();
        history.append(rec("Dengue", 4, 40));

        let weeks: Vec<u32> = snapshot.iter().map(|r| r.week_number()).collect();
        assert_eq!(weeks, vec![3, 1]);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_sort_by_count_is_stable() {
        let mut history: DiseaseHistory =
            vec![rec("D", 1, 50), rec("D", 2, 50), rec("D", 3, 70)]
                .into_iter()
                .collect();

        history.sort_by_count();

        assert_eq!(
            history.as_slice(),
            &[rec("D", 3, 70), rec("D", 1, 50), rec("D", 2, 50)]
        );
    }

    #[test]
    fn test_sort_by_week_orders_ascending() {
        let mut history: DiseaseHistory =
            vec![rec("A", 3, 7), rec("B", 1, 8), rec("C", 2, 9)]
                .into_iter()
                .collect();

        history.sort_by_week();

        assert_eq!(
            history.as_slice(),
            &[rec("B", 1, 8), rec("C", 2, 9), rec("A", 3, 7)]
        );
    }
}
