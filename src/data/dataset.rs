// ============================================================
// Layer 4 - Crop Dataset
// ============================================================
// Numeric feature rows, class indices and the label vocabulary
// they index into.

use anyhow::{bail, Result};
use std::collections::BTreeSet;

use crate::data::splitter::split_train_test;
use crate::domain::sample::{FeatureVector, LabeledSample};

/// Labelled rows in the numeric form the forest trains on.
///
/// Labels are mapped to dense class indices. The vocabulary is
/// sorted alphabetically so class `i` always means the same crop
/// for the same set of labels, whatever the row order in the file.
#[derive(Debug, Clone)]
pub struct CropDataset {
    features: Vec<FeatureVector>,
    targets:  Vec<usize>,
    labels:   Vec<String>,
}

impl CropDataset {
    pub fn from_samples(samples: &[LabeledSample]) -> Result<Self> {
        if samples.is_empty() {
            bail!("Cannot build a dataset from zero samples");
        }

        let labels: Vec<String> = samples
            .iter()
            .map(|s| s.label.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut features = Vec::with_capacity(samples.len());
        let mut targets  = Vec::with_capacity(samples.len());
        for s in samples {
            let row = s.sample.to_vector();
            if let Some(pos) = row.iter().position(|v| !v.is_finite()) {
                bail!("Sample labelled '{}' has a non-finite value at feature {}", s.label, pos);
            }
            // Present by construction: labels came from these samples
            let class = labels.binary_search(&s.label).unwrap_or_default();
            features.push(row);
            targets.push(class);
        }

        Ok(Self { features, targets, labels })
    }

    /// Rows picked by index. The label vocabulary is kept whole so
    /// class indices stay comparable across subsets.
    pub fn subset(&self, indices: &[usize]) -> Self {
        Self {
            features: indices.iter().map(|&i| self.features[i]).collect(),
            targets:  indices.iter().map(|&i| self.targets[i]).collect(),
            labels:   self.labels.clone(),
        }
    }

    /// Seeded shuffle + split into (train, test).
    pub fn split(&self, train_fraction: f64, seed: u64) -> (Self, Self) {
        let indices: Vec<usize> = (0..self.len()).collect();
        let (train_idx, test_idx) = split_train_test(indices, train_fraction, seed);
        (self.subset(&train_idx), self.subset(&test_idx))
    }

    pub fn features(&self) -> &[FeatureVector] { &self.features }

    pub fn targets(&self) -> &[usize] { &self.targets }

    pub fn labels(&self) -> &[String] { &self.labels }

    pub fn num_classes(&self) -> usize { self.labels.len() }

    pub fn len(&self) -> usize { self.features.len() }

    pub fn is_empty(&self) -> bool { self.features.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::SoilSample;

    fn sample(n: f64, label: &str) -> LabeledSample {
        LabeledSample::new(SoilSample::from_vector([n, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]), label)
    }

    #[test]
    fn test_labels_sorted_and_indexed() {
        let ds = CropDataset::from_samples(&[
            sample(1.0, "rice"),
            sample(2.0, "apple"),
            sample(3.0, "rice"),
        ]).unwrap();

        assert_eq!(ds.labels(), ["apple", "rice"]);
        assert_eq!(ds.targets(), [1, 0, 1]);
        assert_eq!(ds.num_classes(), 2);
    }

    #[test]
    fn test_subset_keeps_vocabulary() {
        let ds  = CropDataset::from_samples(&[sample(1.0, "a"), sample(2.0, "b")]).unwrap();
        let sub = ds.subset(&[1]);
        assert_eq!(sub.len(), 1);
        assert_eq!(sub.targets(), [1]);
        assert_eq!(sub.labels(), ds.labels());
    }

    #[test]
    fn test_split_sizes() {
        let rows: Vec<_> = (0..50).map(|i| sample(i as f64, "x")).collect();
        let ds = CropDataset::from_samples(&rows).unwrap();
        let (train, test) = ds.split(0.8, 42);
        assert_eq!(train.len(), 40);
        assert_eq!(test.len(), 10);
    }

    #[test]
    fn test_rejects_empty_and_non_finite() {
        assert!(CropDataset::from_samples(&[]).is_err());
        assert!(CropDataset::from_samples(&[sample(f64::NAN, "a")]).is_err());
    }
}
