// Synthetic crop data for tests.
//
// Each label gets its own tight cluster in feature space, far
// enough from its neighbours that a forest separates them
// perfectly. Label `i` is named `crop_{i:02}` and centred on
// `center(i)`.

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::path::Path;

use crate::domain::sample::{LabeledSample, SoilSample, FEATURE_NAMES};

pub fn label_name(i: usize) -> String {
    format!("crop_{i:02}")
}

pub fn center(i: usize) -> SoilSample {
    let f = i as f64;
    SoilSample {
        nitrogen:    10.0 + f * 6.0,
        phosphorus:  5.0 + f * 5.0,
        potassium:   5.0 + f * 4.0,
        temperature: 12.0 + f * 1.0,
        humidity:    30.0 + f * 3.0,
        ph:          4.5 + f * 0.2,
        rainfall:    40.0 + f * 12.0,
    }
}

/// `per_label` jittered rows for each of `labels` crops.
pub fn samples(labels: usize, per_label: usize, seed: u64) -> Vec<LabeledSample> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(labels * per_label);
    for i in 0..labels {
        let c = center(i).to_vector();
        for _ in 0..per_label {
            // jitter stays under a quarter of the smallest step
            let mut row = c;
            for (j, v) in row.iter_mut().enumerate() {
                let step = [6.0, 5.0, 4.0, 1.0, 3.0, 0.2, 12.0][j];
                *v += rng.gen_range(-0.2..0.2) * step;
            }
            out.push(LabeledSample::new(SoilSample::from_vector(row), label_name(i)));
        }
    }
    out
}

/// Write samples as CSV with the columns reversed relative to
/// FEATURE_NAMES, to exercise name-based column matching.
pub fn write_csv(path: &Path, rows: &[LabeledSample]) {
    let mut w = csv::Writer::from_path(path).unwrap();
    let mut header: Vec<&str> = vec!["label"];
    header.extend(FEATURE_NAMES.iter().rev());
    w.write_record(&header).unwrap();
    for r in rows {
        let mut record = vec![r.label.clone()];
        record.extend(r.sample.to_vector().iter().rev().map(|v| v.to_string()));
        w.write_record(&record).unwrap();
    }
    w.flush().unwrap();
}
