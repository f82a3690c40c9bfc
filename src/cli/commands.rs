// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `train`, `serve` and `predict`
// and all their configurable flags.
//
// clap's derive macros generate help text, missing-argument
// errors, and type conversion (string → usize, f64, ...).
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::train_use_case::TrainConfig;
use crate::domain::sample::SoilSample;
use crate::http::ServerConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train a random forest on a crop CSV and save the model
    Train(TrainArgs),

    /// Load a saved model and serve predictions over HTTP
    Serve(ServeArgs),

    /// Load a saved model and predict a single sample
    Predict(PredictArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV with columns N,P,K,temperature,humidity,ph,rainfall,label
    #[arg(long, default_value = "data/Crop_recommendation.csv")]
    pub dataset: PathBuf,

    /// Where to write the model (overwritten if present)
    #[arg(long, default_value = "crop_model.bin")]
    pub model: PathBuf,

    /// Directory for the per-run metrics CSV
    #[arg(long, default_value = "metrics")]
    pub metrics_dir: PathBuf,

    /// Number of trees in the forest
    #[arg(long, default_value_t = 100)]
    pub trees: usize,

    /// Maximum tree depth; unlimited when omitted
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Nodes with fewer rows than this are not split
    #[arg(long, default_value_t = 2)]
    pub min_samples_split: usize,

    /// Fraction of rows held out for the accuracy check
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Seed for the split and for every tree's randomness
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            dataset_path:      a.dataset,
            model_path:        a.model,
            metrics_dir:       a.metrics_dir,
            n_trees:           a.trees,
            max_depth:         a.max_depth,
            min_samples_split: a.min_samples_split,
            test_fraction:     a.test_fraction,
            seed:              a.seed,
        }
    }
}

/// All arguments for the `serve` command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Model file written by `train`
    #[arg(long, default_value = "crop_model.bin")]
    pub model: PathBuf,

    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, default_value_t = 5000)]
    pub port: u16,

    /// Allowed browser origin; repeat for several. Any origin when omitted.
    #[arg(long = "cors-origin")]
    pub cors_origins: Vec<String>,
}

impl From<ServeArgs> for ServerConfig {
    fn from(a: ServeArgs) -> Self {
        ServerConfig {
            model_path:   a.model,
            host:         a.host,
            port:         a.port,
            cors_origins: a.cors_origins,
        }
    }
}

/// All arguments for the `predict` command
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Model file written by `train`
    #[arg(long, default_value = "crop_model.bin")]
    pub model: PathBuf,

    /// Nitrogen (N)
    #[arg(long)]
    pub nitrogen: f64,

    /// Phosphorus (P)
    #[arg(long)]
    pub phosphorus: f64,

    /// Potassium (K)
    #[arg(long)]
    pub potassium: f64,

    /// Temperature in °C
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: f64,

    /// Relative humidity in %
    #[arg(long)]
    pub humidity: f64,

    #[arg(long)]
    pub ph: f64,

    /// Rainfall in mm
    #[arg(long)]
    pub rainfall: f64,
}

impl PredictArgs {
    pub fn sample(&self) -> SoilSample {
        SoilSample {
            nitrogen:    self.nitrogen,
            phosphorus:  self.phosphorus,
            potassium:   self.potassium,
            temperature: self.temperature,
            humidity:    self.humidity,
            ph:          self.ph,
            rainfall:    self.rainfall,
        }
    }
}
