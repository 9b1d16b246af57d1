// cohort-data/src/datasets/triplet_dataset.rs

use std::collections::BTreeMap;

use cohort_core::rng::seeded_rng;
use cohort_core::{ClassLabel, CohortError, Sample};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use super::traits::Dataset;

/// An (anchor, positive, negative) triplet.
///
/// `positive` shares the anchor's class and is a different sample;
/// `negative` belongs to another class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripletExample {
    pub anchor: Sample,
    pub positive: Sample,
    pub negative: Sample,
}

impl TripletExample {
    /// Class of the anchor, used as the classification target.
    pub fn label(&self) -> &ClassLabel {
        &self.anchor.label
    }
}

/// Eagerly built triplet dataset, one triplet per anchor image.
///
/// The triplets are drawn once at construction, so `get` is a plain lookup
/// and the dataset is immutable afterwards.
#[derive(Debug, Clone)]
pub struct TripletDataset {
    triplets: Vec<TripletExample>,
}

impl TripletDataset {
    /// Builds one triplet for every sample, each class acting in turn as
    /// the anchor pool.
    ///
    /// # Errors
    ///
    /// Returns `CohortError::DegenerateDataset` when fewer than two classes
    /// are present, when an anchor's class has no other member, or when the
    /// positive draw does not succeed within `max_retries`, and
    /// `CohortError::InvalidConfig` when `max_retries` is 0.
    pub fn build(samples: &[Sample], seed: Option<u64>, max_retries: usize) -> Result<Self, CohortError> {
        Self::build_inner(samples, None, seed, max_retries)
    }

    /// Builds triplets only for the anchors of class `anchor_class`.
    pub fn build_for_class(
        samples: &[Sample],
        anchor_class: usize,
        seed: Option<u64>,
        max_retries: usize,
    ) -> Result<Self, CohortError> {
        Self::build_inner(samples, Some(anchor_class), seed, max_retries)
    }

    fn build_inner(
        samples: &[Sample],
        anchor_class: Option<usize>,
        seed: Option<u64>,
        max_retries: usize,
    ) -> Result<Self, CohortError> {
        if max_retries == 0 {
            return Err(CohortError::InvalidConfig {
                field: "max_retries".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        let mut by_class: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (i, sample) in samples.iter().enumerate() {
            by_class.entry(sample.label.index).or_default().push(i);
        }

        if by_class.len() < 2 {
            return Err(CohortError::DegenerateDataset {
                index: 0,
                reason: format!("triplets need at least two classes, found {}", by_class.len()),
                attempts: 0,
            });
        }

        let mut rng = seeded_rng(seed);
        let mut triplets = Vec::new();

        for (&class, pool) in &by_class {
            if anchor_class.is_some_and(|c| c != class) {
                continue;
            }
            let negatives: Vec<usize> = by_class
                .iter()
                .filter(|(other, _)| **other != class)
                .flat_map(|(_, members)| members.iter().copied())
                .collect();

            for &anchor in pool {
                let positive = draw_positive(&mut rng, pool, anchor, max_retries)?;
                // `negatives` is non-empty: at least two classes are present.
                let negative = *negatives.choose(&mut rng).ok_or_else(|| CohortError::DegenerateDataset {
                    index: anchor,
                    reason: "no negative candidate".to_string(),
                    attempts: 0,
                })?;
                triplets.push(TripletExample {
                    anchor: samples[anchor].clone(),
                    positive: samples[positive].clone(),
                    negative: samples[negative].clone(),
                });
            }
            debug!("TripletDataset: {} anchors for class {}", pool.len(), class);
        }

        info!("TripletDataset: built {} triplets", triplets.len());
        Ok(TripletDataset { triplets })
    }

    pub fn triplets(&self) -> &[TripletExample] {
        &self.triplets
    }
}

/// Draws a member of `pool` other than `anchor`, giving up after `max_retries`.
fn draw_positive(rng: &mut StdRng, pool: &[usize], anchor: usize, max_retries: usize) -> Result<usize, CohortError> {
    if pool.len() < 2 {
        return Err(CohortError::DegenerateDataset {
            index: anchor,
            reason: "anchor's class has a single image, no positive exists".to_string(),
            attempts: 0,
        });
    }
    for _ in 0..max_retries {
        let candidate = pool[rng.gen_range(0..pool.len())];
        if candidate != anchor {
            return Ok(candidate);
        }
    }
    Err(CohortError::DegenerateDataset {
        index: anchor,
        reason: "positive draw kept returning the anchor".to_string(),
        attempts: max_retries,
    })
}

impl Dataset for TripletDataset {
    type Item = TripletExample;

    fn get(&self, index: usize) -> Result<Self::Item, CohortError> {
        self.triplets.get(index).cloned().ok_or(CohortError::IndexOutOfBounds {
            index,
            len: self.triplets.len(),
        })
    }

    fn len(&self) -> usize {
        self.triplets.len()
    }
}

#[cfg(test)]
#[path = "triplet_dataset_test.rs"]
mod tests;
