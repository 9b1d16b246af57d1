// cohort-data/src/index.rs
//! # FolderIndex
//!
//! Scans a class-folder tree (`<root>/<class>/<patient>_<slice>.<ext>`) and
//! records every image as a [`Sample`], grouped by patient.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use cohort_core::{ClassLabel, CohortError, IndexConfig, MalformedNamePolicy, PatientId, Sample};
use log::{debug, info, warn};

/// In-memory index of a class-folder dataset.
///
/// Built once; afterwards it is read-only, including the memoised
/// patient → samples mapping.
#[derive(Debug, Clone)]
pub struct FolderIndex {
    classes: Vec<String>,
    samples: Vec<Sample>,
    patient_groups: BTreeMap<PatientId, Vec<usize>>,
}

impl FolderIndex {
    /// Lists the class folders and their images as configured.
    ///
    /// Classes are the configured list when given (in that order), else
    /// every sub-directory of `root` sorted by name. Images inside a class
    /// are sorted by path so the index is the same on every run.
    ///
    /// # Errors
    ///
    /// - `CohortError::InvalidConfig` if the configuration does not validate.
    /// - `CohortError::Io` if a directory cannot be read.
    /// - `CohortError::MissingClassDirectory` if a configured class is absent.
    /// - `CohortError::MalformedFileName` under `MalformedNamePolicy::Abort`.
    /// - `CohortError::EmptyIndex` if no image was found.
    pub fn build(config: &IndexConfig) -> Result<Self, CohortError> {
        config.validate()?;
        let root = config.root.as_path();

        let classes = match &config.classes {
            Some(classes) => {
                for class in classes {
                    if !root.join(class).is_dir() {
                        return Err(CohortError::MissingClassDirectory {
                            root: root.to_path_buf(),
                            class: class.clone(),
                        });
                    }
                }
                classes.clone()
            }
            None => list_class_dirs(root, config.on_malformed)?,
        };

        let mut samples = Vec::new();
        let mut skipped = 0usize;
        for (class_index, class) in classes.iter().enumerate() {
            let label = ClassLabel::new(class_index, class.as_str());
            for path in list_images(&root.join(class), config)? {
                match Sample::from_path(path, label.clone()) {
                    Ok(sample) => samples.push(sample),
                    Err(CohortError::MalformedFileName { path })
                        if config.on_malformed == MalformedNamePolicy::Skip =>
                    {
                        warn!("FolderIndex: skipping {:?}, no patient identifier in file name", path);
                        skipped += 1;
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        if samples.is_empty() {
            return Err(CohortError::EmptyIndex {
                root: root.to_path_buf(),
            });
        }

        let index = Self::from_samples(classes, samples);
        info!(
            "FolderIndex: {} images, {} patients, classes {:?} under {:?}",
            index.len(),
            index.patient_groups.len(),
            index.classes,
            root
        );
        for (class, count) in index.classes.iter().zip(index.class_counts()) {
            info!("FolderIndex: {} images count: {}", class, count);
        }
        if skipped > 0 {
            warn!("FolderIndex: {} file(s) skipped for malformed names", skipped);
        }
        Ok(index)
    }

    /// Builds an index from samples that were listed elsewhere.
    ///
    /// `classes[i]` is expected to be the name of class index `i`.
    pub fn from_samples(classes: Vec<String>, samples: Vec<Sample>) -> Self {
        let mut patient_groups: BTreeMap<PatientId, Vec<usize>> = BTreeMap::new();
        for (i, sample) in samples.iter().enumerate() {
            patient_groups.entry(sample.patient.clone()).or_default().push(i);
        }
        for (patient, members) in &patient_groups {
            let first = &samples[members[0]];
            if members.iter().any(|&m| !samples[m].same_class(first)) {
                warn!("FolderIndex: patient {} has images in more than one class", patient);
            }
        }
        FolderIndex {
            classes,
            samples,
            patient_groups,
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The set of unique patient identifiers.
    pub fn patients(&self) -> BTreeSet<PatientId> {
        self.patient_groups.keys().cloned().collect()
    }

    /// Indices into [`samples`](Self::samples) for every patient.
    pub fn patient_groups(&self) -> &BTreeMap<PatientId, Vec<usize>> {
        &self.patient_groups
    }

    /// Number of images per class, indexed like [`classes`](Self::classes).
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.classes.len()];
        for sample in &self.samples {
            if let Some(count) = counts.get_mut(sample.label.index) {
                *count += 1;
            }
        }
        counts
    }
}

fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>, CohortError> {
    let entries = fs::read_dir(dir).map_err(|e| CohortError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CohortError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

/// Class directory names under `root`; non UTF-8 names follow `policy`.
fn list_class_dirs(root: &Path, policy: MalformedNamePolicy) -> Result<Vec<String>, CohortError> {
    let mut classes = Vec::new();
    for path in read_dir_sorted(root)?.into_iter().filter(|p| p.is_dir()) {
        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => classes.push(name.to_string()),
            None if policy == MalformedNamePolicy::Skip => {
                warn!("FolderIndex: skipping class directory {:?}, name is not UTF-8", path);
            }
            None => return Err(CohortError::MalformedFileName { path }),
        }
    }
    debug!("FolderIndex: found class directories {:?}", classes);
    Ok(classes)
}

fn list_images(dir: &Path, config: &IndexConfig) -> Result<Vec<PathBuf>, CohortError> {
    Ok(read_dir_sorted(dir)?
        .into_iter()
        .filter(|p| p.is_file() && config.accepts_extension(p))
        .collect())
}

#[cfg(test)]
#[path = "index_test.rs"]
mod tests;
