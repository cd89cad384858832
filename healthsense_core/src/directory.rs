//! Hospital directory.
//!
//! Hospitals are kept in insertion order and looked up by name without
//! regard to case. Nothing is ever removed, so a hospital registered once
//! stays resolvable for the life of the engine.

use crate::{DiseaseHistory, Error, Result};

/// A hospital and the disease history it owns
///
/// Name and region are fixed at registration. The history can only be
/// mutated through the directory, which keeps names unique.
#[derive(Clone, Debug)]
pub struct Hospital {
    name: String,
    region: String,
    history: DiseaseHistory,
}

impl Hospital {
    fn new(name: &str, region: &str) -> Self {
        Self {
            name: name.to_string(),
            region: region.to_string(),
            history: DiseaseHistory::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn history(&self) -> &DiseaseHistory {
        &self.history
    }

    fn has_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}

/// All registered hospitals, unique by case-insensitive name
#[derive(Clone, Debug, Default)]
pub struct HospitalDirectory {
    hospitals: Vec<Hospital>,
    capacity: Option<usize>,
}

impl HospitalDirectory {
    /// Unbounded directory
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            hospitals: Vec::new(),
            capacity: Some(capacity),
        }
    }

    /// Register a hospital with an empty history
    ///
    /// A duplicate name or a full directory leaves the directory untouched
    /// and is reported as `DuplicateName` / `CapacityExceeded`.
    pub fn add(&mut self, name: &str, region: &str) -> Result<&Hospital> {
        let name = name.trim();
        let region = region.trim();
        if name.is_empty() || region.is_empty() {
            return Err(Error::invalid_input("name or region is empty"));
        }

        if self.hospitals.iter().any(|h| h.has_name(name)) {
            return Err(Error::DuplicateName(name.to_string()));
        }

        if let Some(capacity) = self.capacity {
            if self.hospitals.len() >= capacity {
                tracing::warn!("Hospital directory full ({}), rejecting {}", capacity, name);
                return Err(Error::CapacityExceeded(format!(
                    "max {} hospitals",
                    capacity
                )));
            }
        }

        tracing::debug!("Registered hospital {} in region {}", name, region);
        self.hospitals.push(Hospital::new(name, region));
        self.hospitals
            .last()
            .ok_or_else(|| Error::not_found(format!("hospital {}", name)))
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Result<&Hospital> {
        self.hospitals
            .iter()
            .find(|h| h.has_name(name))
            .ok_or_else(|| Error::not_found(format!("hospital {}", name.trim())))
    }

    /// Mutable access to one hospital's history; name and region stay fixed
    pub(crate) fn history_mut(&mut self, name: &str) -> Result<&mut DiseaseHistory> {
        self.hospitals
            .iter_mut()
            .find(|h| h.has_name(name))
            .map(|h| &mut h.history)
            .ok_or_else(|| Error::not_found(format!("hospital {}", name.trim())))
    }

    /// Every hospital in insertion order
    pub fn all(&self) -> &[Hospital] {
        &self.hospitals
    }

    pub fn len(&self) -> usize {
        self.hospitals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hospitals.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }
}
