//! The outbreak engine context.
//!
//! `Engine` owns every subsystem and is built once per process from a
//! [`Config`]. Mutations of a hospital's history go through here so each
//! one lands in the undo log with its inverse:
//! - `add_record` pushes an `AddRecord` operation
//! - `sort_history` snapshots the history, sorts, and pushes `SortReplace`
//!
//! Alert queues and the severity tree are independent of the undo log.

use crate::trends::{self, HospitalTrend, PeakWeek, RecordMatch};
use crate::{
    Config, Hospital, HospitalDirectory, Operation, Record, RegionAlertQueues, Report, Result,
    SeverityClassifier, SeverityEntry, SortKey, Traversal, UndoLog,
};

/// Explicit context holding all engine state
#[derive(Debug)]
pub struct Engine {
    directory: HospitalDirectory,
    alerts: RegionAlertQueues,
    severity: SeverityClassifier,
    undo: UndoLog,
}

impl Engine {
    pub fn new(config: &Config) -> Self {
        Self {
            directory: HospitalDirectory::with_capacity_limit(config.limits.max_hospitals),
            alerts: RegionAlertQueues::with_capacity_limit(config.limits.max_regions),
            severity: SeverityClassifier::new(),
            undo: UndoLog::new(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&Config::default())
    }

    // ------------------------------------------------------------------
    // Hospitals and records
    // ------------------------------------------------------------------

    pub fn add_hospital(&mut self, name: &str, region: &str) -> Result<&Hospital> {
        self.directory.add(name, region)
    }

    pub fn hospital(&self, name: &str) -> Result<&Hospital> {
        self.directory.get(name)
    }

    pub fn hospitals(&self) -> &[Hospital] {
        self.directory.all()
    }

    /// Append a validated record to a hospital and make it undoable
    pub fn add_record(&mut self, hospital: &str, record: Record) -> Result<()> {
        let name = self.directory.get(hospital)?.name().to_string();
        self.directory.history_mut(&name)?.append(record.clone());
        tracing::debug!("Added {} to {}", record, name);

        self.undo.push(Operation::AddRecord {
            hospital: name,
            record,
        });
        Ok(())
    }

    /// Append without an undo entry (bulk loading, seeding)
    pub fn load_record(&mut self, hospital: &str, record: Record) -> Result<()> {
        self.directory.history_mut(hospital)?.append(record);
        Ok(())
    }

    /// Sort a hospital's history and make the sort undoable
    ///
    /// Returns the hospital so the caller can show the new order.
    pub fn sort_history(&mut self, hospital: &str, key: SortKey) -> Result<&Hospital> {
        let name = self.directory.get(hospital)?.name().to_string();
        let history = self.directory.history_mut(&name)?;
        let previous = history.clone();
        history.sort_by(key);

        self.undo.push(Operation::SortReplace {
            hospital: name.clone(),
            previous,
            key,
        });
        self.directory.get(&name)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn search_by_disease(&self, disease: &str) -> Vec<RecordMatch<'_>> {
        trends::search_by_disease(&self.directory, disease)
    }

    pub fn records_at_least(&self, threshold: u32, disease: Option<&str>) -> Vec<RecordMatch<'_>> {
        trends::records_at_least(&self.directory, threshold, disease)
    }

    pub fn weekly_trends(&self, disease: &str) -> Vec<HospitalTrend<'_>> {
        trends::weekly_trends(&self.directory, disease)
    }

    pub fn synchronized_peaks(&self, disease: &str, min_overlap: usize) -> Result<Vec<PeakWeek<'_>>> {
        trends::synchronized_peaks(&self.directory, disease, min_overlap)
    }

    // ------------------------------------------------------------------
    // Outbreak alerts
    // ------------------------------------------------------------------

    /// Queue a report under its own region
    pub fn enqueue_report(&mut self, report: Report) -> Result<()> {
        let region = report.region.clone();
        self.alerts.enqueue(&region, report)
    }

    pub fn dequeue_report(&mut self, region: &str) -> Result<Report> {
        self.alerts.dequeue(region)
    }

    pub fn peek_report(&self, region: &str) -> Result<&Report> {
        self.alerts.peek(region)
    }

    pub fn region_reports(&self, region: &str) -> Result<Vec<&Report>> {
        Ok(self.alerts.all_in_order(region)?.collect())
    }

    pub fn alerts(&self) -> &RegionAlertQueues {
        &self.alerts
    }

    // ------------------------------------------------------------------
    // Severity
    // ------------------------------------------------------------------

    /// Rebuild the severity tree from current peaks and walk it
    pub fn classify_severity(&mut self, order: Traversal) -> Vec<&SeverityEntry> {
        self.severity.rebuild(&self.directory);
        self.severity.traverse(order)
    }

    // ------------------------------------------------------------------
    // Undo
    // ------------------------------------------------------------------

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    /// Undo the most recent history mutation
    pub fn undo(&mut self) -> Result<Option<Operation>> {
        self.undo.undo(&mut self.directory)
    }

    /// Re-apply an operation previously returned by [`Engine::undo`]
    ///
    /// The operation is not pushed back onto the undo log.
    pub fn redo(&mut self, operation: &Operation) -> Result<()> {
        operation.redo(&mut self.directory)
    }
}
