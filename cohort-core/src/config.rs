use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CohortError;

/// What to do with an image whose file name carries no patient identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedNamePolicy {
    /// Fail the whole index build with `CohortError::MalformedFileName`.
    #[default]
    Abort,
    /// Drop the file and log a warning.
    Skip,
}

fn default_extensions() -> Vec<String> {
    vec!["jpeg".to_string(), "jpg".to_string(), "png".to_string()]
}

fn default_train_proportion() -> f64 {
    0.8
}

fn default_max_retries() -> usize {
    1000
}

fn default_batch_size() -> usize {
    32
}

fn default_shuffle() -> bool {
    true
}

/// Configuration handed to the indexer and the datasets built on top of it.
///
/// # Fields
/// - `root`             : directory holding one sub-directory per class
/// - `classes`          : class folders to use, `None` means every sub-directory
/// - `extensions`       : accepted image extensions (case-insensitive)
/// - `train_proportion` : share of *patients* assigned to the train split
/// - `seed`             : base seed for every random draw, `None` is non-reproducible
/// - `max_retries`      : bound on every rejection-sampling loop
/// - `on_malformed`     : policy for file names without a patient identifier
/// - `batch_size`, `shuffle`, `drop_last` : defaults for the loaders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    pub root: PathBuf,
    #[serde(default)]
    pub classes: Option<Vec<String>>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_train_proportion")]
    pub train_proportion: f64,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
    #[serde(default)]
    pub on_malformed: MalformedNamePolicy,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    #[serde(default)]
    pub drop_last: bool,
}

impl IndexConfig {
    /// Creates a configuration with default settings for the given root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        IndexConfig {
            root: root.into(),
            classes: None,
            extensions: default_extensions(),
            train_proportion: default_train_proportion(),
            seed: None,
            max_retries: default_max_retries(),
            on_malformed: MalformedNamePolicy::default(),
            batch_size: default_batch_size(),
            shuffle: default_shuffle(),
            drop_last: false,
        }
    }

    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes = Some(classes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_train_proportion(mut self, proportion: f64) -> Self {
        self.train_proportion = proportion;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_malformed_policy(mut self, policy: MalformedNamePolicy) -> Self {
        self.on_malformed = policy;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn with_drop_last(mut self, drop_last: bool) -> Self {
        self.drop_last = drop_last;
        self
    }

    /// Checks the numeric settings before any directory is touched.
    ///
    /// # Errors
    ///
    /// Returns `CohortError::InvalidConfig` naming the offending field.
    pub fn validate(&self) -> Result<(), CohortError> {
        let invalid = |field: &str, reason: String| CohortError::InvalidConfig {
            field: field.to_string(),
            reason,
        };

        if !(self.train_proportion > 0.0 && self.train_proportion < 1.0) {
            return Err(invalid(
                "train_proportion",
                format!("must be in (0, 1), got {}", self.train_proportion),
            ));
        }
        if self.max_retries == 0 {
            return Err(invalid("max_retries", "must be at least 1".to_string()));
        }
        if self.batch_size == 0 {
            return Err(invalid("batch_size", "must be at least 1".to_string()));
        }
        if self.extensions.is_empty() {
            return Err(invalid("extensions", "at least one extension is required".to_string()));
        }
        if let Some(classes) = &self.classes {
            if classes.is_empty() {
                return Err(invalid("classes", "must not be an empty list".to_string()));
            }
            let mut seen = std::collections::HashSet::new();
            if let Some(dup) = classes.iter().find(|c| !seen.insert(c.as_str())) {
                return Err(invalid("classes", format!("class '{}' is listed more than once", dup)));
            }
        }
        Ok(())
    }

    /// True when `path` has one of the configured extensions.
    pub fn accepts_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    /// Reads a configuration from a JSON file.
    ///
    /// Missing optional fields take their defaults; the result is validated.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, CohortError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CohortError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: IndexConfig =
            serde_json::from_str(&content).map_err(|e| CohortError::Config {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        debug!("IndexConfig: loaded {:?} (root {:?}, seed {:?})", path, config.root, config.seed);
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), CohortError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self).map_err(|e| CohortError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| CohortError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
