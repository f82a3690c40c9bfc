// ============================================================
// Layer 5 - Training Run
// ============================================================
// Fits the forest on the training split and scores it on the
// held-out split.
//
// Accuracy is reported, never used to tune anything: there is
// no search over hyperparameters and no cross-validation.

use anyhow::Result;

use crate::application::train_use_case::TrainConfig;
use crate::data::dataset::CropDataset;
use crate::ml::forest::RandomForest;

/// What a training run produced.
#[derive(Debug)]
pub struct TrainingOutcome {
    pub forest:           RandomForest,
    pub train_rows:       usize,
    pub test_rows:        usize,
    /// None when the test split is empty
    pub holdout_accuracy: Option<f64>,
}

pub fn run_training(
    cfg:   &TrainConfig,
    train: &CropDataset,
    test:  &CropDataset,
) -> Result<TrainingOutcome> {
    let forest_cfg = cfg.forest_config();
    tracing::info!(
        "Growing {} trees on {} rows (max_depth={:?}, min_samples_split={})",
        forest_cfg.n_trees,
        train.len(),
        forest_cfg.max_depth,
        forest_cfg.min_samples_split,
    );

    let forest = RandomForest::fit(train, &forest_cfg)?;

    let holdout_accuracy = forest.accuracy(test);
    match holdout_accuracy {
        Some(acc) => tracing::info!(
            "Holdout accuracy: {:.2}% on {} rows",
            acc * 100.0,
            test.len()
        ),
        None => tracing::warn!("Test split is empty - holdout accuracy not measured"),
    }

    Ok(TrainingOutcome {
        forest,
        train_rows: train.len(),
        test_rows:  test.len(),
        holdout_accuracy,
    })
}
