use std::collections::BTreeSet;

use cohort_core::{CohortError, IndexConfig, PatientId};
use cohort_data::{
    check_leakage, Cohort, Dataset, FolderIndex, PairDataset, PairedExample, SimilarityMode, Split,
};

mod common;
use common::{balanced_tree, dataset_tree, init_logger};

#[test]
fn test_prepare_splits_by_patient() {
    init_logger();
    let dir = balanced_tree();
    let cohort = Cohort::prepare(IndexConfig::new(dir.path()).with_seed(89)).unwrap();

    assert_eq!(cohort.index().len(), 40);
    assert_eq!(cohort.split().train().len(), 8);
    assert_eq!(cohort.split().validation().len(), 2);

    let train = cohort.samples(Split::Train);
    let validation = cohort.samples(Split::Validation);
    assert_eq!(train.len(), 32);
    assert_eq!(validation.len(), 8);
    assert!(check_leakage(&train, &validation).is_ok());
}

#[test]
fn test_prepare_five_patients() {
    init_logger();
    let layout: Vec<(&str, &str, usize)> = vec![
        ("AD", "001", 2),
        ("AD", "002", 2),
        ("AD", "003", 2),
        ("NC", "004", 2),
        ("NC", "005", 2),
    ];
    let dir = dataset_tree(&layout);
    let cohort = Cohort::prepare(IndexConfig::new(dir.path()).with_seed(1)).unwrap();
    let train: &BTreeSet<PatientId> = cohort.split().train();
    let validation = cohort.split().validation();
    assert_eq!(train.len(), 4);
    assert_eq!(validation.len(), 1);
    assert!(train.is_disjoint(validation));
}

#[test]
fn test_prepare_single_patient_is_invalid_split() {
    let dir = dataset_tree(&[("AD", "001", 3)]);
    assert!(matches!(
        Cohort::prepare(IndexConfig::new(dir.path()).with_seed(1)),
        Err(CohortError::InvalidSplit { .. })
    ));
}

#[test]
fn test_same_seed_gives_same_split_and_pairs() {
    let dir = balanced_tree();
    let config = IndexConfig::new(dir.path()).with_seed(2024).with_batch_size(8);
    let a = Cohort::prepare(config.clone()).unwrap();
    let b = Cohort::prepare(config).unwrap();
    assert_eq!(a.split(), b.split());

    let pairs_a: Vec<PairedExample> = a
        .pair_loader(Split::Train)
        .flat_map(|batch| batch.unwrap())
        .collect();
    let pairs_b: Vec<PairedExample> = b
        .pair_loader(Split::Train)
        .flat_map(|batch| batch.unwrap())
        .collect();
    assert_eq!(pairs_a.len(), 32);
    assert_eq!(pairs_a, pairs_b);
}

#[test]
fn test_pairs_stay_inside_their_split() {
    let dir = balanced_tree();
    let cohort = Cohort::prepare(IndexConfig::new(dir.path()).with_seed(5)).unwrap();
    // Two validation patients may share a class, so only ask for same-class partners.
    let dataset = cohort.pair_dataset(Split::Validation).with_mode(SimilarityMode::Same);
    for index in 0..dataset.len() {
        let pair = dataset.get(index).unwrap();
        assert!(cohort.split().validation().contains(&pair.first.patient));
        assert!(cohort.split().validation().contains(&pair.second.patient));
    }
}

#[test]
fn test_pair_loader_batches_with_config_defaults() {
    let dir = balanced_tree();
    let config = IndexConfig::new(dir.path())
        .with_seed(5)
        .with_batch_size(5)
        .with_shuffle(false)
        .with_drop_last(true);
    let cohort = Cohort::prepare(config).unwrap();
    let loader = cohort.pair_loader(Split::Train);
    assert_eq!(loader.num_batches(), 6);
    let sizes: Vec<usize> = loader.map(|b| b.unwrap().len()).collect();
    assert_eq!(sizes, vec![5; 6]);
}

#[test]
fn test_triplets_from_train_split() {
    let dir = balanced_tree();
    let cohort = Cohort::prepare(IndexConfig::new(dir.path()).with_seed(11)).unwrap();
    let triplets = cohort.triplet_dataset(Split::Train).unwrap();
    assert_eq!(triplets.len(), cohort.samples(Split::Train).len());
    for triplet in triplets.triplets() {
        assert_eq!(triplet.anchor.label, triplet.positive.label);
        assert_ne!(triplet.anchor.label, triplet.negative.label);
        assert_ne!(triplet.anchor.path, triplet.positive.path);
        assert!(cohort.split().train().contains(&triplet.negative.patient));
    }
}

#[test]
fn test_sample_dataset_and_all_samples() {
    let dir = balanced_tree();
    let cohort = Cohort::prepare(IndexConfig::new(dir.path()).with_seed(3)).unwrap();
    let train = cohort.sample_dataset(Split::Train);
    let validation = cohort.sample_dataset(Split::Validation);
    assert_eq!(train.len() + validation.len(), cohort.all_samples().len());
}

#[test]
fn test_single_image_class_same_pair_fails_fast() {
    let mut layout: Vec<(&str, &str, usize)> = vec![("AD", "100", 3), ("AD", "101", 3)];
    layout.push(("NC", "200", 1));
    let dir = dataset_tree(&layout);
    let index = FolderIndex::build(&IndexConfig::new(dir.path())).unwrap();
    let lonely = index.len() - 1;
    assert_eq!(index.samples()[lonely].label.name, "NC");

    let dataset = PairDataset::new(index.samples().to_vec(), Some(1), 100).with_mode(SimilarityMode::Same);
    assert!(matches!(
        dataset.get(lonely),
        Err(CohortError::DegenerateDataset { .. })
    ));
}

#[test]
fn test_config_file_drives_prepare() {
    let dir = balanced_tree();
    let config_path = dir.path().join("cohort.json");
    IndexConfig::new(dir.path()).with_seed(7).save_json(&config_path).unwrap();

    let loaded = IndexConfig::load_json(&config_path).unwrap();
    let cohort = Cohort::prepare(loaded).unwrap();
    // cohort.json sits at the root, not inside a class folder
    assert_eq!(cohort.index().len(), 40);
    assert_eq!(cohort.index().classes(), &["AD".to_string(), "NC".to_string()]);
}
