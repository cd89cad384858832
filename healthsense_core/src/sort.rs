//! Stable merge sort for disease trends.
//!
//! Top-down: the left half takes the middle element (ceil(n/2)), each half
//! is sorted recursively, then merged. On equal keys the left element is
//! emitted first, which keeps the original relative order.

use crate::{Record, SortKey};

/// Sort `records` by `key`, returning a freshly built sequence
pub fn merge_sort(mut records: Vec<Record>, key: SortKey) -> Vec<Record> {
    if records.len() <= 1 {
        return records;
    }

    let right = records.split_off(split_point(records.len()));
    let left = merge_sort(records, key);
    let right = merge_sort(right, key);

    merge(left, right, key)
}

/// Size of the left half for a sequence of `len` elements
fn split_point(len: usize) -> usize {
    len - len / 2
}

/// Whether the left-half record goes next; ties favour the left half
fn takes_left(key: SortKey, left: &Record, right: &Record) -> bool {
    match key {
        SortKey::CaseCountDesc => left.case_count() >= right.case_count(),
        SortKey::WeekAsc => left.week_number() <= right.week_number(),
    }
}

fn merge(left: Vec<Record>, right: Vec<Record>, key: SortKey) -> Vec<Record> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(a), Some(b)) => takes_left(key, a, b),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };

        let next = if take_left { left.next() } else { right.next() };
        merged.extend(next);
    }

    merged
}
