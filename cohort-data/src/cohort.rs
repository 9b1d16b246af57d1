// cohort-data/src/cohort.rs

use cohort_core::rng::derive_seed;
use cohort_core::{CohortError, IndexConfig, Sample};
use log::info;

use crate::dataloader::DataLoader;
use crate::datasets::{PairDataset, SampleDataset, TripletDataset};
use crate::index::FolderIndex;
use crate::samplers::{RandomSampler, Sampler, SequentialSampler};
use crate::split::{check_leakage, split_patients, Split, SplitAssignment};

// Independent RNG streams derived from the configured seed.
const SPLIT_STREAM: u64 = 0;
const PAIR_STREAM: u64 = 1;
const TRIPLET_STREAM: u64 = 2;
const LOADER_STREAM: u64 = 3;

fn stream_for(base: u64, split: Split) -> u64 {
    match split {
        Split::Train => base * 2,
        Split::Validation => base * 2 + 1,
    }
}

/// A dataset directory indexed and split by patient, ready to hand out
/// pair, triplet and sample datasets for either side of the split.
#[derive(Debug, Clone)]
pub struct Cohort {
    config: IndexConfig,
    index: FolderIndex,
    split: SplitAssignment,
}

impl Cohort {
    /// Indexes `config.root` and splits its patients.
    ///
    /// # Errors
    ///
    /// Any index build error, or `CohortError::InvalidSplit` when the
    /// patients cannot be divided with the configured proportion.
    pub fn prepare(config: IndexConfig) -> Result<Self, CohortError> {
        let index = FolderIndex::build(&config)?;
        Self::from_index(config, index)
    }

    /// Splits an index that was already built.
    pub fn from_index(config: IndexConfig, index: FolderIndex) -> Result<Self, CohortError> {
        config.validate()?;
        let split = split_patients(
            &index.patients(),
            config.train_proportion,
            derive_seed(config.seed, SPLIT_STREAM),
        )?;
        let cohort = Cohort { config, index, split };

        let train = cohort.samples(Split::Train);
        let validation = cohort.samples(Split::Validation);
        check_leakage(&train, &validation)?;
        info!(
            "Cohort: {} train images / {} validation images with a training split of {}",
            train.len(),
            validation.len(),
            cohort.config.train_proportion
        );
        Ok(cohort)
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn index(&self) -> &FolderIndex {
        &self.index
    }

    pub fn split(&self) -> &SplitAssignment {
        &self.split
    }

    /// Samples of one side of the split.
    pub fn samples(&self, split: Split) -> Vec<Sample> {
        self.split.filter(split, self.index.samples())
    }

    /// Every indexed sample, ignoring the split (held-out test directories).
    pub fn all_samples(&self) -> Vec<Sample> {
        self.index.samples().to_vec()
    }

    pub fn pair_dataset(&self, split: Split) -> PairDataset {
        PairDataset::new(
            self.samples(split),
            derive_seed(self.config.seed, stream_for(PAIR_STREAM, split)),
            self.config.max_retries,
        )
    }

    pub fn triplet_dataset(&self, split: Split) -> Result<TripletDataset, CohortError> {
        TripletDataset::build(
            &self.samples(split),
            derive_seed(self.config.seed, stream_for(TRIPLET_STREAM, split)),
            self.config.max_retries,
        )
    }

    pub fn sample_dataset(&self, split: Split) -> SampleDataset {
        SampleDataset::new(self.samples(split))
    }

    /// Batches pairs of one split using the configured loader settings.
    ///
    /// Shuffling follows `config.shuffle`, seeded from the configured seed.
    pub fn pair_loader(&self, split: Split) -> DataLoader<PairDataset, Box<dyn Sampler>> {
        let sampler: Box<dyn Sampler> = if self.config.shuffle {
            Box::new(RandomSampler::with_seed(
                false,
                None,
                derive_seed(self.config.seed, stream_for(LOADER_STREAM, split)),
            ))
        } else {
            Box::new(SequentialSampler::new())
        };
        DataLoader::new(
            self.pair_dataset(split),
            self.config.batch_size,
            sampler,
            self.config.drop_last,
            None,
        )
    }
}
