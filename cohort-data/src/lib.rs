//! Patient-aware dataset indexing for contrastive and triplet training.
//!
//! Images are listed from a class-folder tree, grouped by the patient
//! identifier in their file names, split into train and validation sets by
//! patient, and served as pairs, triplets or single samples through the
//! [`Dataset`] trait.

pub mod cohort;
pub mod dataloader;
pub mod datasets;
pub mod index;
pub mod samplers;
pub mod split;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export main components
pub use cohort::Cohort;
pub use dataloader::DataLoader;
pub use datasets::{
    Dataset, PairDataset, PairedExample, SampleDataset, SimilarityMode, TripletDataset, TripletExample,
};
pub use index::FolderIndex;
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
pub use split::{check_leakage, split_patients, Split, SplitAssignment};
