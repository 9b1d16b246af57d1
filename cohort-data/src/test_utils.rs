// cohort-data/src/test_utils.rs

use cohort_core::{ClassLabel, Sample};

// Helpers shared by the unit test modules of this crate.
// allow(dead_code) because not every test module uses every helper.

/// Builds a sample at `<class>/<patient>_<slice>.jpeg`.
#[allow(dead_code)]
pub(crate) fn make_sample(class_index: usize, class: &str, patient: &str, slice: usize) -> Sample {
    let path = format!("{}/{}_{}.jpeg", class, patient, slice);
    Sample::from_path(path, ClassLabel::new(class_index, class)).expect("Test sample creation failed")
}

/// Builds `patients` patients with `slices` images each for every class,
/// class `i` getting patient ids `"{i}{p:03}"`.
#[allow(dead_code)]
pub(crate) fn synthetic_samples(classes: &[&str], patients: usize, slices: usize) -> Vec<Sample> {
    let mut samples = Vec::new();
    for (class_index, class) in classes.iter().enumerate() {
        for p in 0..patients {
            let patient = format!("{}{:03}", class_index, p);
            for s in 0..slices {
                samples.push(make_sample(class_index, class, &patient, s));
            }
        }
    }
    samples
}
