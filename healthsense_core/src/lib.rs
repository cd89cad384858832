#![forbid(unsafe_code)]

//! Core data-structure engine for the HealthSense outbreak tracker.
//!
//! This crate provides:
//! - Value types (weekly records, alert reports, severity entries)
//! - Per-hospital disease histories with a stable merge sort
//! - The hospital directory
//! - Per-region FIFO alert queues
//! - The severity ranking tree
//! - A three-deep undo log
//! - Cross-hospital trend queries
//!
//! Everything lives in memory for the life of one process.

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod history;
pub mod sort;
pub mod directory;
pub mod alerts;
pub mod severity;
pub mod undo;
pub mod trends;
pub mod engine;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use history::DiseaseHistory;
pub use directory::{Hospital, HospitalDirectory};
pub use alerts::RegionAlertQueues;
pub use severity::SeverityClassifier;
pub use undo::{Operation, UndoLog, UNDO_DEPTH};
pub use engine::Engine;
