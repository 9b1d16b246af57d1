// cohort-data/src/datasets/pair_dataset.rs

use std::collections::HashMap;
use std::sync::Mutex;

use cohort_core::rng::seeded_rng;
use cohort_core::{CohortError, Sample};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::Rng;

use super::traits::Dataset;

/// How the similarity flag of each pair is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimilarityMode {
    /// Fair coin per access.
    #[default]
    Random,
    /// Always look for a partner of the same class.
    Same,
    /// Always look for a partner of a different class.
    Different,
}

/// Two samples and whether they share a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairedExample {
    pub first: Sample,
    pub second: Sample,
    pub similar: bool,
}

impl PairedExample {
    /// Contrastive target: `1` for a same-class pair, `0` otherwise.
    pub fn similarity(&self) -> u8 {
        u8::from(self.similar)
    }
}

/// Contrastive pair dataset over one split.
///
/// Every `get(index)` returns the sample at `index` paired with a partner
/// drawn by rejection sampling: a similarity flag is drawn first, then
/// candidate indices are drawn uniformly over the whole split (never the
/// query itself) until one with a matching (or mismatching) class turns up.
/// The draw is bounded by `max_retries`; when no partner can exist at all
/// the call fails immediately.
///
/// The generator lives behind a `Mutex`, so the dataset can be shared
/// between loading threads. With a seed, two datasets over the same
/// samples return the same pairs for the same sequence of `get` calls.
#[derive(Debug)]
pub struct PairDataset {
    samples: Vec<Sample>,
    class_counts: HashMap<usize, usize>,
    mode: SimilarityMode,
    max_retries: usize,
    rng: Mutex<StdRng>,
}

impl PairDataset {
    /// Creates a new `PairDataset`.
    ///
    /// # Arguments
    ///
    /// * `samples`: The samples of the active split.
    /// * `seed`: Seed for the pair draws, `None` for a non-reproducible stream.
    /// * `max_retries`: Upper bound on candidate draws per `get`. Zero would
    ///   make every draw fail, so it is raised to 1 with a warning.
    pub fn new(samples: Vec<Sample>, seed: Option<u64>, max_retries: usize) -> Self {
        if max_retries == 0 {
            warn!("PairDataset: max_retries = 0 allows no draw, using 1");
        }
        let mut class_counts = HashMap::new();
        for sample in &samples {
            *class_counts.entry(sample.label.index).or_insert(0) += 1;
        }
        PairDataset {
            samples,
            class_counts,
            mode: SimilarityMode::default(),
            max_retries: max_retries.max(1),
            rng: Mutex::new(seeded_rng(seed)),
        }
    }

    /// Forces the similarity flag instead of drawing it.
    pub fn with_mode(mut self, mode: SimilarityMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> SimilarityMode {
        self.mode
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples that could serve as a partner for `query`.
    fn candidate_count(&self, query: &Sample, similar: bool) -> usize {
        let same = self.class_counts.get(&query.label.index).copied().unwrap_or(0);
        if similar {
            same.saturating_sub(1)
        } else {
            self.samples.len() - same
        }
    }
}

impl Dataset for PairDataset {
    type Item = PairedExample;

    fn get(&self, index: usize) -> Result<Self::Item, CohortError> {
        let len = self.samples.len();
        if index >= len {
            return Err(CohortError::IndexOutOfBounds { index, len });
        }

        let mut rng = self.rng.lock().map_err(|_| CohortError::LockPoisoned {
            what: "PairDataset rng".to_string(),
        })?;

        let similar = match self.mode {
            SimilarityMode::Random => rng.gen_bool(0.5),
            SimilarityMode::Same => true,
            SimilarityMode::Different => false,
        };

        let query = &self.samples[index];
        if self.candidate_count(query, similar) == 0 {
            return Err(CohortError::DegenerateDataset {
                index,
                reason: format!(
                    "no {} partner exists for class '{}'",
                    if similar { "same-class" } else { "different-class" },
                    query.label
                ),
                attempts: 0,
            });
        }

        for attempt in 1..=self.max_retries {
            let choice = rng.gen_range(0..len);
            if choice == index {
                continue;
            }
            let candidate = &self.samples[choice];
            if query.same_class(candidate) == similar {
                debug!(
                    "PairDataset: index {} paired with {} (similar = {}) after {} draw(s)",
                    index, choice, similar, attempt
                );
                return Ok(PairedExample {
                    first: query.clone(),
                    second: candidate.clone(),
                    similar,
                });
            }
        }

        Err(CohortError::DegenerateDataset {
            index,
            reason: format!(
                "no partner with similar = {} drawn for class '{}'",
                similar, query.label
            ),
            attempts: self.max_retries,
        })
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
#[path = "pair_dataset_test.rs"]
mod tests;
