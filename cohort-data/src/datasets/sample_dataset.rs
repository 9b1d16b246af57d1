use cohort_core::{CohortError, Sample};
use super::traits::Dataset;

/// A dataset of single labelled images, one item per sample.
///
/// This is the plain `(image, label)` view used to train a classifier on
/// top of the embedding network.
#[derive(Debug, Clone)]
pub struct SampleDataset {
    samples: Vec<Sample>,
}

impl SampleDataset {
    /// Creates a new `SampleDataset` from a vector of samples.
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

impl Dataset for SampleDataset {
    type Item = Sample;

    /// Returns a clone of the sample at the given index.
    ///
    /// # Errors
    ///
    /// Returns `CohortError::IndexOutOfBounds` if the index is out of bounds.
    fn get(&self, index: usize) -> Result<Self::Item, CohortError> {
        self.samples.get(index).cloned().ok_or(CohortError::IndexOutOfBounds {
            index,
            len: self.samples.len(),
        })
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
#[path = "sample_dataset_test.rs"]
mod tests;
