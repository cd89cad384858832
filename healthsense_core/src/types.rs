//! Core value types for the HealthSense engine.
//!
//! This module defines the leaf types shared by every subsystem:
//! - Weekly disease records
//! - Outbreak alert reports
//! - Severity entries and their labels
//! - Sort keys and tree traversal orders

use crate::{Error, Result};
use std::fmt;

// ============================================================================
// Disease Records
// ============================================================================

/// One week of case counts for a disease at a single hospital
///
/// Only [`Record::new`] builds one, so every record held by the engine has a
/// non-empty disease name and a positive week and count.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Record {
    disease_name: String,
    week_number: u32,
    case_count: u32,
}

impl Record {
    /// Build a validated record
    ///
    /// The disease name is trimmed; it must be non-empty, and both week and
    /// count must be positive.
    pub fn new(disease_name: &str, week_number: u32, case_count: u32) -> Result<Self> {
        let disease_name = disease_name.trim();
        if disease_name.is_empty() {
            return Err(Error::invalid_input("disease name is empty"));
        }
        if week_number == 0 {
            return Err(Error::invalid_input("week number must be positive"));
        }
        if case_count == 0 {
            return Err(Error::invalid_input("case count must be positive"));
        }

        Ok(Self {
            disease_name: disease_name.to_string(),
            week_number,
            case_count,
        })
    }

    pub fn disease_name(&self) -> &str {
        &self.disease_name
    }

    pub fn week_number(&self) -> u32 {
        self.week_number
    }

    pub fn case_count(&self) -> u32 {
        self.case_count
    }

    /// Case-insensitive disease match
    pub fn is_disease(&self, disease: &str) -> bool {
        self.disease_name.eq_ignore_ascii_case(disease.trim())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} week {} count {}",
            self.disease_name, self.week_number, self.case_count
        )
    }
}

/// Ordering applied by the trend sorter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    /// Highest case count first
    CaseCountDesc,
    /// Earliest week first
    WeekAsc,
}

// ============================================================================
// Outbreak Reports
// ============================================================================

/// An outbreak alert raised by a hospital for its region
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub region: String,
    pub hospital: String,
    pub summary: String,
}

impl Report {
    pub fn new(region: &str, hospital: &str, summary: &str) -> Result<Self> {
        let region = region.trim();
        let hospital = hospital.trim();
        if region.is_empty() || hospital.is_empty() {
            return Err(Error::invalid_input("region or hospital is empty"));
        }

        Ok(Self {
            region: region.to_string(),
            hospital: hospital.to_string(),
            summary: summary.trim().to_string(),
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Hospital: {} | Region: {}] {}",
            self.hospital, self.region, self.summary
        )
    }
}

// ============================================================================
// Severity
// ============================================================================

/// Severity band derived from a peak case count
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SeverityLabel {
    Mild,
    Moderate,
    Severe,
}

impl SeverityLabel {
    /// 0-20 Mild, 21-50 Moderate, 51+ Severe
    pub fn for_case_count(case_count: u32) -> Self {
        match case_count {
            0..=20 => SeverityLabel::Mild,
            21..=50 => SeverityLabel::Moderate,
            _ => SeverityLabel::Severe,
        }
    }
}

impl fmt::Display for SeverityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SeverityLabel::Mild => "Mild",
            SeverityLabel::Moderate => "Moderate",
            SeverityLabel::Severe => "Severe",
        };
        f.write_str(label)
    }
}

/// A hospital's peak record as ranked by the severity classifier
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeverityEntry {
    pub hospital: String,
    pub disease: String,
    pub case_count: u32,
}

impl SeverityEntry {
    pub fn from_peak(hospital: &str, peak: &Record) -> Self {
        Self {
            hospital: hospital.to_string(),
            disease: peak.disease_name().to_string(),
            case_count: peak.case_count(),
        }
    }

    pub fn label(&self) -> SeverityLabel {
        SeverityLabel::for_case_count(self.case_count)
    }
}

impl fmt::Display for SeverityEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) cases: {} - {}",
            self.disease,
            self.hospital,
            self.case_count,
            self.label()
        )
    }
}

/// Depth-first visiting order for the severity tree
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Traversal {
    /// Left, node, right: ascending severity
    InOrder,
    /// Node, left, right
    PreOrder,
    /// Left, right, node
    PostOrder,
}
