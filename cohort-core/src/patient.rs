use std::fmt;
use std::path::Path;

use crate::error::CohortError;

/// Identifier of the subject an image was taken from.
///
/// Ordering is lexicographic so that sets of patients can be turned into a
/// stable list before any shuffling happens.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatientId(String);

impl PatientId {
    /// Wraps an already extracted identifier.
    pub fn new(id: impl Into<String>) -> Self {
        PatientId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PatientId {
    fn from(id: &str) -> Self {
        PatientId::new(id)
    }
}

/// Extracts the patient identifier from an image path.
///
/// The identifier is the part of the file name (everything after the last
/// directory separator) that precedes the last underscore, so
/// `train/AD/218391_78.jpeg` yields `218391` and `OAS1_0001_MR1_12.png`
/// yields `OAS1_0001_MR1`.
///
/// # Errors
///
/// Returns `CohortError::MalformedFileName` when the path has no file name,
/// the file name is not valid UTF-8, contains no underscore, or the part
/// before the last underscore is empty.
pub fn parse_patient_id(path: &Path) -> Result<PatientId, CohortError> {
    let malformed = || CohortError::MalformedFileName {
        path: path.to_path_buf(),
    };

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(malformed)?;

    match file_name.rfind('_') {
        Some(end) if end > 0 => Ok(PatientId::new(&file_name[..end])),
        _ => Err(malformed()),
    }
}

#[cfg(test)]
#[path = "patient_test.rs"]
mod tests;
