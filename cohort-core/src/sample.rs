use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::CohortError;
use crate::patient::{parse_patient_id, PatientId};

/// Class of an image, derived from the name of the folder that holds it.
///
/// `index` is the position of the class in the sorted class list of the
/// index that produced it; two labels are the same class when their
/// indices match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassLabel {
    pub index: usize,
    pub name: String,
}

impl ClassLabel {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        ClassLabel {
            index,
            name: name.into(),
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A single image file with its class and the patient it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sample {
    pub path: PathBuf,
    pub label: ClassLabel,
    pub patient: PatientId,
}

impl Sample {
    /// Builds a sample, deriving the patient identifier from `path`.
    ///
    /// # Errors
    ///
    /// Propagates `CohortError::MalformedFileName` from [`parse_patient_id`].
    pub fn from_path(path: impl Into<PathBuf>, label: ClassLabel) -> Result<Self, CohortError> {
        let path = path.into();
        let patient = parse_patient_id(&path)?;
        Ok(Sample {
            path,
            label,
            patient,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when both samples carry the same class.
    pub fn same_class(&self, other: &Sample) -> bool {
        self.label.index == other.label.index
    }
}
