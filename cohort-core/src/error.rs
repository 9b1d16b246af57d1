use std::path::PathBuf;
use thiserror::Error;

use crate::patient::PatientId;

/// Custom error type for the cohort indexing crates.
///
/// Variants are grouped by the stage that raises them: index building
/// (`MalformedFileName`, `Io`, `EmptyIndex`, `MissingClassDirectory`),
/// splitting (`InvalidSplit`), sampling (`DegenerateDataset`) and
/// configuration (`InvalidConfig`, `Config`).
#[derive(Error, Debug)]
pub enum CohortError {
    #[error("Malformed file name {path:?}: expected `<patient_id>_<slice>.<ext>`")]
    MalformedFileName { path: PathBuf },

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No images found under {root:?}")]
    EmptyIndex { root: PathBuf },

    #[error("Class directory '{class}' not found under {root:?}")]
    MissingClassDirectory { root: PathBuf, class: String },

    #[error("Degenerate dataset at index {index}: {reason} (after {attempts} attempts)")]
    DegenerateDataset {
        index: usize,
        reason: String,
        attempts: usize,
    },

    #[error("Invalid split: {reason}")]
    InvalidSplit { reason: String },

    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Cannot load configuration from {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("Index out of bounds: index {index} for dataset of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Patient leakage: {} patient(s) appear in both sets: {patients:?}", .patients.len())]
    Leakage { patients: Vec<PatientId> },

    #[error("Lock poisoned: {what}")]
    LockPoisoned { what: String },
}

impl CohortError {
    /// Returns true for the errors raised while building a folder index.
    pub fn is_index_build_error(&self) -> bool {
        matches!(
            self,
            CohortError::MalformedFileName { .. }
                | CohortError::Io { .. }
                | CohortError::EmptyIndex { .. }
                | CohortError::MissingClassDirectory { .. }
        )
    }
}
