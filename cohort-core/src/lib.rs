// Déclare les modules principaux de la crate
pub mod config;
pub mod error;
pub mod patient;
pub mod rng;
pub mod sample;

// Ré-exporte les types principaux pour qu'ils soient accessibles via `cohort_core::X`
pub use config::{IndexConfig, MalformedNamePolicy};
pub use error::CohortError;
pub use patient::{parse_patient_id, PatientId};
pub use sample::{ClassLabel, Sample};
