use std::fs;
use std::path::Path;
use tempfile::TempDir;

// Shared fixtures for the integration tests.
// allow(dead_code) because every test file does not use every helper.

#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Writes an empty image file `<root>/<class>/<name>`.
#[allow(dead_code)]
pub fn touch(root: &Path, class: &str, name: &str) {
    let dir = root.join(class);
    fs::create_dir_all(&dir).expect("Fixture directory creation failed");
    fs::write(dir.join(name), b"").expect("Fixture file creation failed");
}

/// Creates an AD/NC tree where each `(class, patient, slices)` entry gets
/// `slices` images named `<patient>_<slice>.jpeg`.
#[allow(dead_code)]
pub fn dataset_tree(layout: &[(&str, &str, usize)]) -> TempDir {
    let dir = tempfile::tempdir().expect("Temp dir creation failed");
    for &(class, patient, slices) in layout {
        for slice in 0..slices {
            touch(dir.path(), class, &format!("{}_{}.jpeg", patient, slice));
        }
    }
    dir
}

/// Five AD and five NC patients with four slices each.
#[allow(dead_code)]
pub fn balanced_tree() -> TempDir {
    let mut layout = Vec::new();
    for p in ["100", "101", "102", "103", "104"] {
        layout.push(("AD", p, 4));
    }
    for p in ["200", "201", "202", "203", "204"] {
        layout.push(("NC", p, 4));
    }
    dataset_tree(&layout)
}
