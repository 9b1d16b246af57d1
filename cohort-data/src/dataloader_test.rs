// cohort-data/src/dataloader_test.rs

use super::*;
use crate::datasets::{PairDataset, SampleDataset, SimilarityMode};
use crate::samplers::{RandomSampler, SequentialSampler};
use crate::test_utils::{make_sample, synthetic_samples};

fn patients_of(batch: &[cohort_core::Sample]) -> Vec<String> {
    batch.iter().map(|s| s.patient.to_string()).collect()
}

#[test]
fn test_dataloader_sequential() {
    let dataset = SampleDataset::new(synthetic_samples(&["AD"], 6, 1));
    let loader = DataLoader::new(dataset, 2, SequentialSampler::new(), false, None);
    let batches: Vec<_> = loader.map(|b| b.expect("Batch should not error")).collect();
    assert_eq!(batches.len(), 3);
    assert_eq!(patients_of(&batches[0]), vec!["0000", "0001"]);
    assert_eq!(patients_of(&batches[2]), vec!["0004", "0005"]);
}

#[test]
fn test_dataloader_last_batch_partial() {
    let dataset = SampleDataset::new(synthetic_samples(&["AD"], 5, 1));
    let loader = DataLoader::new(dataset, 2, SequentialSampler::new(), false, None);
    assert_eq!(loader.num_batches(), 3);
    let sizes: Vec<usize> = loader.map(|b| b.unwrap().len()).collect();
    assert_eq!(sizes, vec![2, 2, 1]);
}

#[test]
fn test_dataloader_drop_last() {
    let dataset = SampleDataset::new(synthetic_samples(&["AD"], 5, 1));
    let loader = DataLoader::new(dataset, 2, SequentialSampler::new(), true, None);
    assert_eq!(loader.num_batches(), 2);
    let sizes: Vec<usize> = loader.map(|b| b.unwrap().len()).collect();
    assert_eq!(sizes, vec![2, 2]); // Le dernier batch de taille 1 est ignoré
}

#[test]
fn test_dataloader_reset_starts_new_epoch() {
    let dataset = SampleDataset::new(synthetic_samples(&["AD", "NC"], 4, 2));
    let mut loader = DataLoader::new(dataset, 4, RandomSampler::with_seed(false, None, Some(3)), false, None);
    let first: usize = loader.by_ref().map(|b| b.unwrap().len()).sum();
    assert_eq!(first, 16);
    assert!(loader.next().is_none());
    loader.reset();
    let second: usize = loader.by_ref().map(|b| b.unwrap().len()).sum();
    assert_eq!(second, 16);
}

#[test]
fn test_dataloader_collate_fn() {
    let dataset = SampleDataset::new(synthetic_samples(&["AD", "NC"], 2, 1));
    let collate: CollateFn<SampleDataset> = Box::new(|mut batch: Vec<cohort_core::Sample>| {
        batch.reverse();
        Ok(batch)
    });
    let mut loader = DataLoader::new(dataset, 4, SequentialSampler::new(), false, Some(collate));
    let batch = loader.next().unwrap().unwrap();
    assert_eq!(patients_of(&batch), vec!["1001", "1000", "0001", "0000"]);
}

#[test]
fn test_dataloader_pairs() {
    let dataset = PairDataset::new(synthetic_samples(&["AD", "NC"], 4, 4), Some(9), 1000);
    let loader = DataLoader::new(dataset, 8, RandomSampler::with_seed(false, None, Some(9)), false, None);
    let mut seen = 0;
    for batch in loader {
        for pair in batch.unwrap() {
            assert_eq!(pair.similar, pair.first.label == pair.second.label);
            seen += 1;
        }
    }
    assert_eq!(seen, 32);
}

#[test]
fn test_dataloader_propagates_dataset_errors() {
    let samples = vec![make_sample(0, "AD", "1", 0), make_sample(1, "NC", "2", 0)];
    let dataset = PairDataset::new(samples, Some(0), 10).with_mode(SimilarityMode::Same);
    let mut loader = DataLoader::new(dataset, 2, SequentialSampler::new(), false, None);
    assert!(matches!(
        loader.next(),
        Some(Err(CohortError::DegenerateDataset { .. }))
    ));
}
