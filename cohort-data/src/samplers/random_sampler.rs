// cohort-data/src/samplers/random_sampler.rs

use super::traits::Sampler;
use cohort_core::rng::seeded_rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Mutex;

/// A sampler that randomly samples indices from a dataset.
///
/// The generator is owned by the sampler and advances across epochs, so a
/// seeded sampler yields a different but reproducible order every epoch.
#[derive(Debug)]
pub struct RandomSampler {
    replacement: bool,
    num_samples: Option<usize>,
    rng: Mutex<StdRng>,
}

impl RandomSampler {
    /// Creates a new unseeded `RandomSampler`.
    ///
    /// # Arguments
    ///
    /// * `replacement`: If `true`, an index can be selected multiple times.
    /// * `num_samples`: The total number of samples to draw. If `None`, it defaults to the dataset size.
    pub fn new(replacement: bool, num_samples: Option<usize>) -> Self {
        Self::with_seed(replacement, num_samples, None)
    }

    /// Creates a `RandomSampler` whose orderings are reproducible for a given seed.
    pub fn with_seed(replacement: bool, num_samples: Option<usize>, seed: Option<u64>) -> Self {
        RandomSampler {
            replacement,
            num_samples,
            rng: Mutex::new(seeded_rng(seed)),
        }
    }
}

impl Sampler for RandomSampler {
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        if dataset_len == 0 {
            return Box::new(std::iter::empty());
        }

        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| {
            log::warn!("RandomSampler: rng mutex was poisoned. Recovering.");
            poisoned.into_inner()
        });
        let actual_num_samples = self.num_samples.unwrap_or(dataset_len);

        if self.replacement {
            let indices: Vec<usize> = (0..actual_num_samples)
                .map(|_| rng.gen_range(0..dataset_len))
                .collect();
            Box::new(indices.into_iter())
        } else {
            if actual_num_samples > dataset_len {
                log::warn!(
                    "RandomSampler: num_samples ({}) > dataset_len ({}) without replacement. Returning empty iterator.",
                    actual_num_samples,
                    dataset_len
                );
                return Box::new(std::iter::empty());
            }
            let mut indices: Vec<usize> = (0..dataset_len).collect();
            indices.shuffle(&mut *rng);
            indices.truncate(actual_num_samples);
            Box::new(indices.into_iter())
        }
    }

    fn len(&self, dataset_len: usize) -> usize {
        self.num_samples.unwrap_or(dataset_len)
    }
}

#[cfg(test)]
#[path = "random_sampler_test.rs"]
mod tests;
