//! Read-only queries across all hospitals.
//!
//! These never mutate a history and never touch the undo log:
//! - first record per hospital for a disease
//! - records at or above a case-count threshold
//! - weekly case totals for a disease
//! - weeks where several hospitals peak together

use crate::{DiseaseHistory, Error, Hospital, HospitalDirectory, Record, Result};
use std::collections::BTreeMap;

/// A record found in a specific hospital's history
#[derive(Clone, Copy, Debug)]
pub struct RecordMatch<'a> {
    pub hospital: &'a Hospital,
    pub record: &'a Record,
}

/// Weekly case totals for one disease at one hospital
#[derive(Clone, Debug)]
pub struct HospitalTrend<'a> {
    pub hospital: &'a Hospital,
    /// week number -> summed case count, ascending by week
    pub weeks: BTreeMap<u32, u64>,
}

/// A week in which `hospitals` all recorded their peak for a disease
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeakWeek<'a> {
    pub week: u32,
    pub hospitals: Vec<&'a str>,
}

/// First matching record of `disease` in each hospital, in directory order
pub fn search_by_disease<'a>(directory: &'a HospitalDirectory, disease: &str) -> Vec<RecordMatch<'a>> {
    directory
        .all()
        .iter()
        .filter_map(|hospital| {
            hospital
                .history()
                .search_first(disease)
                .map(|record| RecordMatch { hospital, record })
        })
        .collect()
}

/// Every record with at least `threshold` cases, optionally for one disease
pub fn records_at_least<'a>(
    directory: &'a HospitalDirectory,
    threshold: u32,
    disease: Option<&str>,
) -> Vec<RecordMatch<'a>> {
    directory
        .all()
        .iter()
        .flat_map(|hospital| {
            hospital
                .history()
                .iter()
                .filter(move |r| r.case_count() >= threshold)
                .filter(move |r| disease.map_or(true, |d| r.is_disease(d)))
                .map(move |record| RecordMatch { hospital, record })
        })
        .collect()
}

/// Case totals per week for `disease` in one history
pub fn weekly_trend(history: &DiseaseHistory, disease: &str) -> BTreeMap<u32, u64> {
    let mut weeks = BTreeMap::new();
    for record in history.iter().filter(|r| r.is_disease(disease)) {
        *weeks.entry(record.week_number()).or_insert(0) += u64::from(record.case_count());
    }
    weeks
}

/// Weekly trends for every hospital that has recorded `disease`
pub fn weekly_trends<'a>(directory: &'a HospitalDirectory, disease: &str) -> Vec<HospitalTrend<'a>> {
    directory
        .all()
        .iter()
        .filter_map(|hospital| {
            let weeks = weekly_trend(hospital.history(), disease);
            (!weeks.is_empty()).then_some(HospitalTrend { hospital, weeks })
        })
        .collect()
}

/// Week with the largest total; the earliest week wins ties
fn peak_week(weeks: &BTreeMap<u32, u64>) -> Option<u32> {
    let mut peak: Option<(u32, u64)> = None;
    for (&week, &total) in weeks {
        match peak {
            Some((_, best)) if total <= best => {}
            _ => peak = Some((week, total)),
        }
    }
    peak.map(|(week, _)| week)
}

/// Weeks in which at least `min_overlap` hospitals hit their peak for `disease`
///
/// Each hospital contributes its single peak week. Results are ascending by
/// week.
pub fn synchronized_peaks<'a>(
    directory: &'a HospitalDirectory,
    disease: &str,
    min_overlap: usize,
) -> Result<Vec<PeakWeek<'a>>> {
    if min_overlap == 0 {
        return Err(Error::invalid_input("overlap threshold must be at least 1"));
    }

    let mut by_week: BTreeMap<u32, Vec<&'a str>> = BTreeMap::new();
    for trend in weekly_trends(directory, disease) {
        if let Some(week) = peak_week(&trend.weeks) {
            by_week.entry(week).or_default().push(trend.hospital.name());
        }
    }

    Ok(by_week
        .into_iter()
        .filter(|(_, hospitals)| hospitals.len() >= min_overlap)
        .map(|(week, hospitals)| PeakWeek { week, hospitals })
        .collect())
}
