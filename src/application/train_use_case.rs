// ============================================================
// Layer 2 - TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the CSV dataset        (Layer 4 - data)
//   Step 2: Build numeric dataset       (Layer 4 - data)
//   Step 3: Seeded train/test split     (Layer 4 - data)
//   Step 4: Grow and score the forest   (Layer 5 - ml)
//   Step 5: Save the model artifact     (Layer 6 - infra)
//   Step 6: Append training metrics     (Layer 6 - infra)
//   Step 7: Smoke-check one prediction  (Layer 5 - ml)

use anyhow::{ensure, Result};
use std::path::{Path, PathBuf};

use crate::data::{dataset::CropDataset, loader::CsvLoader};
use crate::domain::sample::SoilSample;
use crate::domain::traits::SampleSource;
use crate::infra::{
    artifact::{ModelArtifact, ModelStore},
    metrics::{MetricsLogger, TrainingMetrics},
};
use crate::ml::{
    forest::ForestConfig,
    inferencer::Inferencer,
    trainer::run_training,
};

// ─── Training Configuration ──────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub dataset_path:      PathBuf,
    pub model_path:        PathBuf,
    pub metrics_dir:       PathBuf,
    pub n_trees:           usize,
    pub max_depth:         Option<usize>,
    pub min_samples_split: usize,
    pub test_fraction:     f64,
    pub seed:              u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            dataset_path:      PathBuf::from("data/Crop_recommendation.csv"),
            model_path:        PathBuf::from("crop_model.bin"),
            metrics_dir:       PathBuf::from("metrics"),
            n_trees:           100,
            max_depth:         None,
            min_samples_split: 2,
            test_fraction:     0.2,
            seed:              42,
        }
    }
}

impl TrainConfig {
    pub fn forest_config(&self) -> ForestConfig {
        ForestConfig {
            n_trees:           self.n_trees,
            seed:              self.seed,
            max_depth:         self.max_depth,
            min_samples_split: self.min_samples_split,
        }
    }
}

/// Summary handed back to the CLI for printing.
#[derive(Debug, Clone)]
pub struct TrainReport {
    pub model_path:       PathBuf,
    pub trees:            usize,
    pub labels:           Vec<String>,
    pub train_rows:       usize,
    pub test_rows:        usize,
    pub holdout_accuracy: Option<f64>,
    pub example_sample:   SoilSample,
    pub example_crop:     String,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<TrainReport> {
        let cfg = &self.config;
        ensure!(
            (0.0..1.0).contains(&cfg.test_fraction),
            "test fraction must be in [0, 1), got {}",
            cfg.test_fraction
        );

        // ── Step 1: Load the labelled rows ────────────────────────────────────
        tracing::info!("Loading dataset from '{}'", cfg.dataset_path.display());
        let samples = CsvLoader::new(&cfg.dataset_path).load_all()?;

        // ── Step 2: Numeric features + label vocabulary ───────────────────────
        let dataset = CropDataset::from_samples(&samples)?;
        tracing::info!("{} rows, {} distinct crops", dataset.len(), dataset.num_classes());

        // ── Step 3: Train / test split (80/20 by default) ─────────────────────
        let (train, test) = dataset.split(1.0 - cfg.test_fraction, cfg.seed);
        tracing::info!("Split: {} train, {} test", train.len(), test.len());

        // ── Step 4: Grow the forest ───────────────────────────────────────────
        let outcome = run_training(cfg, &train, &test)?;

        // ── Step 5: Persist ───────────────────────────────────────────────────
        let artifact = ModelArtifact::new(dataset.labels().to_vec(), outcome.forest);
        ModelStore::new(&cfg.model_path).save(&artifact)?;

        // ── Step 6: Metrics row ───────────────────────────────────────────────
        let metrics = TrainingMetrics::now(
            artifact.forest.n_trees(),
            outcome.train_rows,
            outcome.test_rows,
            artifact.labels.len(),
            outcome.holdout_accuracy,
        );
        // The model is already on disk; a metrics failure must not fail the run
        if let Err(e) = append_metrics(&cfg.metrics_dir, &metrics) {
            tracing::warn!("Training metrics not recorded: {:#}", e);
        }

        // ── Step 7: Example prediction ────────────────────────────────────────
        let inferencer     = Inferencer::from_artifact(artifact);
        let example_sample = SoilSample::reference();
        let example_crop   = inferencer.predict(&example_sample)?.to_string();

        Ok(TrainReport {
            model_path:       cfg.model_path.clone(),
            trees:            inferencer.n_trees(),
            labels:           inferencer.labels().to_vec(),
            train_rows:       outcome.train_rows,
            test_rows:        outcome.test_rows,
            holdout_accuracy: outcome.holdout_accuracy,
            example_sample,
            example_crop,
        })
    }
}

fn append_metrics(dir: &Path, metrics: &TrainingMetrics) -> Result<()> {
    let logger = MetricsLogger::new(dir)?;
    logger.log(metrics)?;
    tracing::info!("Appended run metrics to '{}'", logger.csv_path().display());
    Ok(())
}
