pub mod traits;
pub mod sample_dataset;
pub mod pair_dataset;
pub mod triplet_dataset;

pub use traits::Dataset;
pub use sample_dataset::SampleDataset;
pub use pair_dataset::{PairDataset, PairedExample, SimilarityMode};
pub use triplet_dataset::{TripletDataset, TripletExample};
