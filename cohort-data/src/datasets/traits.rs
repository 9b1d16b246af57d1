// cohort-data/src/datasets/traits.rs

use cohort_core::CohortError;

/// Represents a dataset that can be accessed by index.
///
/// A dataset is a collection of items, where each item can be a single
/// `Sample`, a pair, a triplet, or any other custom type that implements
/// `Send + 'static`.
pub trait Dataset {
    /// The type of a single item returned by the dataset.
    ///
    /// This type must be `Send` and `'static` so batches can be handed to
    /// loading threads.
    type Item: Send + 'static;

    /// Returns the item at the given index.
    ///
    /// # Arguments
    ///
    /// * `index` - The index of the item to retrieve.
    ///
    /// # Errors
    ///
    /// Returns `CohortError` if the index is out of bounds or if the item
    /// cannot be produced (e.g. rejection sampling gave up).
    fn get(&self, index: usize) -> Result<Self::Item, CohortError>;

    /// Returns the total number of items in the dataset.
    fn len(&self) -> usize;

    /// Checks if the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
