// ============================================================
// Layer 5 - Random Forest
// ============================================================
// An ensemble of independently randomised decision trees.
//
// The trees themselves are CART classifiers from linfa-trees,
// split on Gini impurity. This module only decides what each
// tree sees and how their answers are combined:
//   - every tree is fitted on a bootstrap resample of the
//     training rows (n draws with replacement from n rows)
//   - prediction is a majority vote over all trees, ties going
//     to the lowest class index (the alphabetically first label)
//
// Trees are grown in parallel with rayon. Every tree owns an
// RNG seeded from (seed, tree index), so the fitted forest is
// identical no matter how rayon schedules the work.
//
// Reference: Breiman (1996) Bagging Predictors
//            linfa-trees crate documentation

use anyhow::{anyhow, bail, Result};
use linfa::prelude::*;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{arr2, Array1, Array2, Axis};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data::dataset::CropDataset;
use crate::domain::sample::FeatureVector;

/// Hyperparameters for one forest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestConfig {
    pub n_trees:           usize,
    pub seed:              u64,
    /// Maximum tree depth; None grows until leaves are pure
    pub max_depth:         Option<usize>,
    /// Nodes with fewer rows than this become leaves
    pub min_samples_split: usize,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees:           100,
            seed:              42,
            max_depth:         None,
            min_samples_split: 2,
        }
    }
}

type Tree = DecisionTree<f64, usize>;

#[derive(Serialize, Deserialize)]
pub struct RandomForest {
    trees:       Vec<Tree>,
    num_classes: usize,
}

impl fmt::Debug for RandomForest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomForest")
            .field("trees", &self.trees.len())
            .field("num_classes", &self.num_classes)
            .finish()
    }
}

impl RandomForest {
    pub fn fit(dataset: &CropDataset, cfg: &ForestConfig) -> Result<Self> {
        if dataset.is_empty() {
            bail!("Cannot fit a forest on an empty training set");
        }
        if cfg.n_trees == 0 {
            bail!("A forest needs at least one tree");
        }

        let records = arr2(dataset.features());
        let targets = Array1::from_vec(dataset.targets().to_vec());
        let n       = dataset.len();

        let trees = (0..cfg.n_trees)
            .into_par_iter()
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(tree_seed(cfg.seed, t));
                let rows: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                let bag = Dataset::new(
                    records.select(Axis(0), &rows),
                    targets.select(Axis(0), &rows),
                );

                Tree::params()
                    .split_quality(SplitQuality::Gini)
                    .max_depth(cfg.max_depth)
                    .min_weight_split(cfg.min_samples_split as f32)
                    .fit(&bag)
                    .map_err(|e| anyhow!("Failed to grow tree {}: {}", t, e))
            })
            .collect::<Result<Vec<Tree>>>()?;

        tracing::debug!(
            "Grew {} trees (mean depth {:.1}, mean leaves {:.1})",
            trees.len(),
            trees.iter().map(Tree::max_depth).sum::<usize>() as f64 / trees.len() as f64,
            trees.iter().map(Tree::num_leaves).sum::<usize>() as f64 / trees.len() as f64,
        );

        Ok(Self { trees, num_classes: dataset.num_classes() })
    }

    /// Per-row vote counts for every row of `records`.
    fn vote_matrix(&self, records: &Array2<f64>) -> Vec<Vec<usize>> {
        let mut votes = vec![vec![0usize; self.num_classes]; records.nrows()];
        for tree in &self.trees {
            let predicted: Array1<usize> = tree.predict(records);
            for (row, &class) in votes.iter_mut().zip(predicted.iter()) {
                if let Some(v) = row.get_mut(class) {
                    *v += 1;
                }
            }
        }
        votes
    }

    /// Votes per class for one row.
    pub fn votes(&self, x: &FeatureVector) -> Vec<usize> {
        self.vote_matrix(&arr2(&[*x])).pop().unwrap_or_default()
    }

    /// Majority-vote class index for one row.
    pub fn predict(&self, x: &FeatureVector) -> usize {
        argmax(&self.votes(x))
    }

    /// Fraction of rows in `dataset` predicted correctly.
    /// None when the dataset is empty.
    pub fn accuracy(&self, dataset: &CropDataset) -> Option<f64> {
        if dataset.is_empty() {
            return None;
        }
        let votes   = self.vote_matrix(&arr2(dataset.features()));
        let correct = votes
            .iter()
            .zip(dataset.targets())
            .filter(|&(v, &y)| argmax(v) == y)
            .count();
        Some(correct as f64 / dataset.len() as f64)
    }

    pub fn n_trees(&self) -> usize { self.trees.len() }

    pub fn num_classes(&self) -> usize { self.num_classes }

    /// Structural checks run after deserialisation.
    pub fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            bail!("forest has no trees");
        }
        if self.num_classes == 0 {
            bail!("forest votes over zero classes");
        }
        Ok(())
    }
}

/// Index of the largest count; ties go to the lowest index.
fn argmax(counts: &[usize]) -> usize {
    let mut best = 0;
    for (i, &c) in counts.iter().enumerate() {
        if c > counts[best] {
            best = i;
        }
    }
    best
}

/// Distinct, reproducible seed per tree
fn tree_seed(seed: u64, tree: usize) -> u64 {
    seed ^ (tree as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    fn small_config(n_trees: usize) -> ForestConfig {
        ForestConfig { n_trees, ..ForestConfig::default() }
    }

    #[test]
    fn test_argmax_ties_go_low() {
        assert_eq!(argmax(&[1, 3, 3]), 1);
        assert_eq!(argmax(&[0, 0]), 0);
    }

    #[test]
    fn test_separable_clusters_are_learned() {
        let ds     = CropDataset::from_samples(&fixtures::samples(5, 30, 1)).unwrap();
        let forest = RandomForest::fit(&ds, &small_config(15)).unwrap();

        assert_eq!(forest.n_trees(), 15);
        for i in 0..5 {
            let class = forest.predict(&fixtures::center(i).to_vector());
            assert_eq!(ds.labels()[class], fixtures::label_name(i));
        }
        assert_eq!(forest.accuracy(&ds), Some(1.0));
    }

    #[test]
    fn test_same_seed_same_forest() {
        let ds = CropDataset::from_samples(&fixtures::samples(4, 20, 3)).unwrap();
        let a  = RandomForest::fit(&ds, &small_config(10)).unwrap();
        let b  = RandomForest::fit(&ds, &small_config(10)).unwrap();
        assert_eq!(bincode::serialize(&a).unwrap(), bincode::serialize(&b).unwrap());
    }

    #[test]
    fn test_votes_sum_to_tree_count() {
        let ds     = CropDataset::from_samples(&fixtures::samples(3, 10, 5)).unwrap();
        let forest = RandomForest::fit(&ds, &small_config(7)).unwrap();
        let votes  = forest.votes(&fixtures::center(1).to_vector());
        assert_eq!(votes.len(), 3);
        assert_eq!(votes.iter().sum::<usize>(), 7);
    }

    #[test]
    fn test_max_depth_is_passed_to_every_tree() {
        let ds  = CropDataset::from_samples(&fixtures::samples(8, 10, 2)).unwrap();
        let cfg = ForestConfig { max_depth: Some(2), ..small_config(5) };
        let forest = RandomForest::fit(&ds, &cfg).unwrap();
        assert!(forest.trees.iter().all(|t| t.max_depth() <= 2));
    }

    #[test]
    fn test_rejects_zero_trees_and_empty_data() {
        let ds = CropDataset::from_samples(&fixtures::samples(2, 5, 0)).unwrap();
        assert!(RandomForest::fit(&ds, &small_config(0)).is_err());
        assert!(RandomForest::fit(&ds.subset(&[]), &small_config(3)).is_err());
    }

    #[test]
    fn test_accuracy_on_empty_set_is_none() {
        let ds     = CropDataset::from_samples(&fixtures::samples(2, 5, 0)).unwrap();
        let forest = RandomForest::fit(&ds, &small_config(3)).unwrap();
        assert_eq!(forest.accuracy(&ds.subset(&[])), None);
        assert!(forest.validate().is_ok());
    }
}
