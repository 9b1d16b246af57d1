// dataloader.rs
//! # DataLoader
//!
//! Le module `DataLoader` regroupe les items d'un `Dataset` (paires, triplets
//! ou échantillons simples) en batches de taille fixe, dans l'ordre fourni
//! par un `Sampler`.
//!
//! ## Exemple d'utilisation basique
//!
//! ```rust
//! use cohort_data::dataloader::DataLoader;
//! use cohort_data::datasets::SampleDataset;
//! use cohort_data::samplers::SequentialSampler;
//! use cohort_core::{ClassLabel, Sample};
//!
//! let samples: Vec<Sample> = (0..6)
//!     .map(|i| Sample::from_path(format!("AD/{}_0.jpeg", i), ClassLabel::new(0, "AD")).unwrap())
//!     .collect();
//! let dataset = SampleDataset::new(samples);
//! let loader = DataLoader::new(dataset, 4, SequentialSampler::new(), false, None);
//! for batch in loader {
//!     let batch = batch.expect("Pas d'erreur attendue");
//!     println!("Batch de {} échantillons", batch.len());
//! }
//! ```
//!
//! ## Fonctionnalités principales
//!
//! - Batching automatique des données
//! - Sampling flexible via le trait `Sampler` (séquentiel ou aléatoire avec graine)
//! - Fonction de collation personnalisable
//! - Option pour ignorer le dernier batch incomplet (`drop_last`)
//! - Plusieurs epochs via `reset`

use crate::datasets::Dataset;
use crate::samplers::Sampler;
use cohort_core::CohortError;

/// Type pour la fonction de collation personnalisée.
///
/// Cette fonction prend un vecteur de samples (issus du dataset) et retourne le batch final.
pub type CollateFn<D> = Box<dyn Fn(Vec<<D as Dataset>::Item>) -> Result<Vec<<D as Dataset>::Item>, CohortError> + Send + Sync>;

/// DataLoader générique pour le batching et le sampling de données.
///
/// # Paramètres de type
/// - `D`: Le type du dataset, qui doit implémenter le trait [`Dataset`].
/// - `S`: Le type du sampler, qui doit implémenter le trait [`Sampler`].
///
/// Une erreur renvoyée par `Dataset::get` (par exemple un
/// `DegenerateDataset` pendant le tirage d'une paire) est propagée telle
/// quelle comme item de l'itérateur.
pub struct DataLoader<D: Dataset, S: Sampler> {
    /// Le dataset source.
    pub dataset: D,
    /// La taille des batches.
    pub batch_size: usize,
    /// Le sampler utilisé pour générer les indices.
    pub sampler: S,
    /// Si vrai, le dernier batch est ignoré s'il est incomplet.
    pub drop_last: bool,
    /// Fonction de collation optionnelle pour assembler les samples en batch.
    pub collate_fn: Option<CollateFn<D>>,
    indices_iter: Box<dyn Iterator<Item = usize> + Send + Sync>,
}

impl<D: Dataset, S: Sampler> DataLoader<D, S> {
    /// Crée un nouveau DataLoader et démarre la première epoch.
    ///
    /// # Arguments
    /// - `dataset`: Le dataset à utiliser.
    /// - `batch_size`: La taille des batches.
    /// - `sampler`: Le sampler pour générer les indices.
    /// - `drop_last`: Si vrai, le dernier batch est ignoré s'il est incomplet.
    /// - `collate_fn`: Fonction de collation personnalisée (optionnelle).
    pub fn new(dataset: D, batch_size: usize, sampler: S, drop_last: bool, collate_fn: Option<CollateFn<D>>) -> Self {
        let indices_iter = sampler.iter(dataset.len());
        Self {
            dataset,
            batch_size,
            sampler,
            drop_last,
            collate_fn,
            indices_iter,
        }
    }

    /// Redémarre l'itération pour une nouvelle epoch (nouvel ordre du sampler).
    pub fn reset(&mut self) {
        self.indices_iter = self.sampler.iter(self.dataset.len());
    }

    /// Nombre de batches produits par une epoch complète.
    pub fn num_batches(&self) -> usize {
        let n = self.sampler.len(self.dataset.len());
        if self.batch_size == 0 {
            return 0;
        }
        if self.drop_last {
            n / self.batch_size
        } else {
            n.div_ceil(self.batch_size)
        }
    }
}

impl<D: Dataset, S: Sampler> Iterator for DataLoader<D, S> {
    type Item = Result<Vec<<D as Dataset>::Item>, CohortError>;

    /// Renvoie le prochain batch de données.
    ///
    /// # Retour
    /// - `Some(Ok(batch))` : Un batch de données prêt à l'emploi.
    /// - `Some(Err(e))` : Une erreur lors de la récupération d'un item.
    /// - `None` : Fin de l'epoch.
    fn next(&mut self) -> Option<Self::Item> {
        let mut batch = Vec::with_capacity(self.batch_size);
        for _ in 0..self.batch_size {
            if let Some(idx) = self.indices_iter.next() {
                match self.dataset.get(idx) {
                    Ok(item) => batch.push(item),
                    Err(e) => return Some(Err(e)),
                }
            } else {
                break;
            }
        }
        if batch.is_empty() || (self.drop_last && batch.len() < self.batch_size) {
            return None;
        }
        if let Some(ref collate_fn) = self.collate_fn {
            Some(collate_fn(batch))
        } else {
            Some(Ok(batch))
        }
    }
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
