//! Per-region outbreak alert queues.
//!
//! Each region gets its own FIFO queue the first time a report is enqueued
//! for it. Region keys are case-insensitive; the spelling of the first
//! enqueue is kept for display.

use crate::{Error, Report, Result};
use std::collections::{HashMap, VecDeque};

/// FIFO of reports for one region
#[derive(Clone, Debug)]
struct RegionQueue {
    region: String,
    reports: VecDeque<Report>,
}

/// One alert queue per region, created lazily
#[derive(Clone, Debug, Default)]
pub struct RegionAlertQueues {
    queues: HashMap<String, RegionQueue>,
    capacity: Option<usize>,
}

fn region_key(region: &str) -> String {
    region.trim().to_lowercase()
}

impl RegionAlertQueues {
    /// Unbounded region table
    pub fn new() -> Self {
        Self::default()
    }

    /// Region table holding at most `capacity` distinct regions
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            queues: HashMap::new(),
            capacity: Some(capacity),
        }
    }

    /// Append a report at the tail of the region's queue
    pub fn enqueue(&mut self, region: &str, report: Report) -> Result<()> {
        let key = region_key(region);
        if key.is_empty() {
            return Err(Error::invalid_input("region is empty"));
        }

        if !self.queues.contains_key(&key) {
            if let Some(capacity) = self.capacity {
                if self.queues.len() >= capacity {
                    tracing::warn!("Region table full ({}), dropping report for {}", capacity, region);
                    return Err(Error::CapacityExceeded(format!("max {} regions", capacity)));
                }
            }
            tracing::debug!("Creating alert queue for region {}", region.trim());
        }

        self.queues
            .entry(key)
            .or_insert_with(|| RegionQueue {
                region: region.trim().to_string(),
                reports: VecDeque::new(),
            })
            .reports
            .push_back(report);

        Ok(())
    }

    /// Remove and return the oldest report for a region
    pub fn dequeue(&mut self, region: &str) -> Result<Report> {
        self.queues
            .get_mut(&region_key(region))
            .and_then(|q| q.reports.pop_front())
            .ok_or_else(|| Error::not_found(format!("no reports queued for region {}", region.trim())))
    }

    /// Oldest report for a region, left in place
    pub fn peek(&self, region: &str) -> Result<&Report> {
        self.queues
            .get(&region_key(region))
            .and_then(|q| q.reports.front())
            .ok_or_else(|| Error::not_found(format!("no reports queued for region {}", region.trim())))
    }

    /// Front-to-back view of a region's queue
    ///
    /// A region that has never been enqueued to is `NotFound`; a known region
    /// whose queue has been drained yields an empty iterator.
    pub fn all_in_order(&self, region: &str) -> Result<impl Iterator<Item = &Report> + '_> {
        self.queues
            .get(&region_key(region))
            .map(|q| q.reports.iter())
            .ok_or_else(|| Error::not_found(format!("no queue for region {}", region.trim())))
    }

    /// Display name of a known region
    pub fn region_name(&self, region: &str) -> Option<&str> {
        self.queues.get(&region_key(region)).map(|q| q.region.as_str())
    }

    /// Number of distinct regions with a queue
    pub fn region_count(&self) -> usize {
        self.queues.len()
    }

    /// Reports waiting in one region (0 for unknown regions)
    pub fn queue_len(&self, region: &str) -> usize {
        self.queues
            .get(&region_key(region))
            .map_or(0, |q| q.reports.len())
    }
}
