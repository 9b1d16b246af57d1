//! Indexe un répertoire AD/NC, découpe les patients en train/validation et
//! affiche quelques batches de paires contrastives et de triplets.
//!
//! Usage : `cargo run --example pair_loading_example -- <root> [config.json]`

use cohort_core::{CohortError, IndexConfig};
use cohort_data::{Cohort, Dataset, PairDataset, Split};

fn main() -> Result<(), CohortError> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let root = args.next().unwrap_or_else(|| "data/AD_NC/train".to_string());
    let config = match args.next() {
        Some(path) => IndexConfig::load_json(path)?,
        None => IndexConfig::new(&root).with_seed(89),
    };

    let cohort = Cohort::prepare(config)?;
    println!("Classes: {:?}", cohort.index().classes());
    println!("Images par classe: {:?}", cohort.index().class_counts());

    println!("\n--- Paires (train) ---");
    for (i, batch) in cohort.pair_loader(Split::Train).take(2).enumerate() {
        let batch = batch?;
        println!("Batch {i} : {} paires", batch.len());
        for pair in batch.iter().take(3) {
            println!(
                "  {} / {} -> {}",
                pair.first.path.display(),
                pair.second.path.display(),
                pair.similarity()
            );
        }
    }

    println!("\n--- Triplets (validation) ---");
    match cohort.triplet_dataset(Split::Validation) {
        Ok(triplets) => {
            for triplet in triplets.triplets().iter().take(3) {
                println!(
                    "  [{}] {} | {} | {}",
                    triplet.label(),
                    triplet.anchor.path.display(),
                    triplet.positive.path.display(),
                    triplet.negative.path.display()
                );
            }
        }
        Err(e) => println!("  Pas de triplets pour la validation : {e}"),
    }

    // Un répertoire de test séparé n'est pas découpé : toutes ses images servent.
    let test_pairs = PairDataset::new(cohort.all_samples(), Some(89), cohort.config().max_retries);
    println!("\n{} paires disponibles sur l'ensemble complet", test_pairs.len());
    Ok(())
}
