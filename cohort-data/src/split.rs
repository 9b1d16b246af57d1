// cohort-data/src/split.rs
//! Patient-level train/validation split.
//!
//! Patients, not images, are assigned to a split so that no subject's
//! scans end up on both sides.

use std::collections::BTreeSet;

use cohort_core::rng::seeded_rng;
use cohort_core::{CohortError, PatientId, Sample};
use log::{info, warn};
use rand::seq::SliceRandom;

/// Side of a patient split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Split {
    Train,
    Validation,
}

/// Disjoint train and validation patient sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitAssignment {
    train: BTreeSet<PatientId>,
    validation: BTreeSet<PatientId>,
}

/// Partitions `patients` into train and validation sets.
///
/// The patients are laid out in sorted order, shuffled with a generator
/// seeded from `seed`, and the first `floor(proportion * n)` go to train.
/// Without a seed the shuffle is drawn from OS entropy and the split is
/// not reproducible.
///
/// # Errors
///
/// Returns `CohortError::InvalidSplit` if `proportion` is not in (0, 1) or
/// if either side would receive no patient (which is always the case for
/// a single patient).
pub fn split_patients(
    patients: &BTreeSet<PatientId>,
    proportion: f64,
    seed: Option<u64>,
) -> Result<SplitAssignment, CohortError> {
    if !(proportion > 0.0 && proportion < 1.0) {
        return Err(CohortError::InvalidSplit {
            reason: format!("train proportion must be in (0, 1), got {}", proportion),
        });
    }

    let total = patients.len();
    let n_train = (proportion * total as f64).floor() as usize;
    if n_train == 0 || n_train >= total {
        return Err(CohortError::InvalidSplit {
            reason: format!(
                "proportion {} of {} patient(s) leaves {} for train and {} for validation",
                proportion,
                total,
                n_train,
                total.saturating_sub(n_train)
            ),
        });
    }

    if seed.is_none() {
        warn!("split_patients: no seed given, the patient split is not reproducible");
    }
    let mut ordered: Vec<PatientId> = patients.iter().cloned().collect();
    ordered.shuffle(&mut seeded_rng(seed));

    let validation: BTreeSet<PatientId> = ordered.split_off(n_train).into_iter().collect();
    let train: BTreeSet<PatientId> = ordered.into_iter().collect();
    info!(
        "split_patients: {} train / {} validation patients (proportion {})",
        train.len(),
        validation.len(),
        proportion
    );
    Ok(SplitAssignment { train, validation })
}

impl SplitAssignment {
    pub fn train(&self) -> &BTreeSet<PatientId> {
        &self.train
    }

    pub fn validation(&self) -> &BTreeSet<PatientId> {
        &self.validation
    }

    /// Patients assigned to `split`.
    pub fn patients_in(&self, split: Split) -> &BTreeSet<PatientId> {
        match split {
            Split::Train => &self.train,
            Split::Validation => &self.validation,
        }
    }

    /// Which side `patient` was assigned to, if any.
    pub fn split_of(&self, patient: &PatientId) -> Option<Split> {
        if self.train.contains(patient) {
            Some(Split::Train)
        } else if self.validation.contains(patient) {
            Some(Split::Validation)
        } else {
            None
        }
    }

    /// Samples whose patient belongs to `split`, in their original order.
    ///
    /// Patients unknown to the assignment are in neither split.
    pub fn filter(&self, split: Split, samples: &[Sample]) -> Vec<Sample> {
        let patients = self.patients_in(split);
        samples
            .iter()
            .filter(|s| patients.contains(&s.patient))
            .cloned()
            .collect()
    }

    /// Like [`filter`](Self::filter) but returns positions into `samples`.
    pub fn filter_indices(&self, split: Split, samples: &[Sample]) -> Vec<usize> {
        let patients = self.patients_in(split);
        samples
            .iter()
            .enumerate()
            .filter(|(_, s)| patients.contains(&s.patient))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Fails if any patient has samples in both `a` and `b`.
///
/// # Errors
///
/// Returns `CohortError::Leakage` listing the shared patients, sorted.
pub fn check_leakage(a: &[Sample], b: &[Sample]) -> Result<(), CohortError> {
    let left: BTreeSet<&PatientId> = a.iter().map(|s| &s.patient).collect();
    let right: BTreeSet<&PatientId> = b.iter().map(|s| &s.patient).collect();
    let shared: Vec<PatientId> = left.intersection(&right).map(|&p| p.clone()).collect();
    if shared.is_empty() {
        Ok(())
    } else {
        Err(CohortError::Leakage { patients: shared })
    }
}

#[cfg(test)]
#[path = "split_test.rs"]
mod tests;
